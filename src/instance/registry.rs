//! Instance registry discovery
//!
//! Every running instance owns a `passenger.*` directory inside one of the
//! registry directories. The directory holds `properties.json`, the
//! `creation_finalized` marker, the full admin password file and the
//! `agents.s/` control sockets.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::registry;
use crate::error::{PassengerError, Result};

use super::credentials::AdminCredentials;
use super::models::{Instance, InstanceProperties};

/// Scans registry directories for running instances
#[derive(Debug, Clone)]
pub struct InstanceRegistry {
    dirs: Vec<PathBuf>,
}

impl InstanceRegistry {
    /// Registry using the standard directories, honoring
    /// `PASSENGER_INSTANCE_REGISTRY_DIR` and `TMPDIR`
    pub fn from_env() -> Self {
        let dirs = default_dirs(
            std::env::var(registry::DIR_ENV_VAR).ok(),
            std::env::var(registry::TMPDIR_ENV_VAR).ok(),
        );
        debug!("Instance registry directories: {:?}", dirs);
        Self { dirs }
    }

    /// Registry with explicit directories (for testing)
    pub fn with_dirs(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// List all running instances, oldest first
    pub fn list(&self) -> Result<Vec<Instance>> {
        let mut instances = Vec::new();

        for dir in &self.dirs {
            if !dir.is_dir() {
                debug!("Skipping missing registry directory {}", dir.display());
                continue;
            }

            let entries = fs::read_dir(dir).map_err(|e| {
                PassengerError::Registry(format!(
                    "Failed to read registry directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;

            for entry in entries.flatten() {
                let file_name = entry.file_name();
                let Some(name) = file_name.to_str() else {
                    continue;
                };
                if !name.starts_with(registry::INSTANCE_DIR_PREFIX) {
                    continue;
                }
                if let Some(instance) = load_instance(&entry.path()) {
                    instances.push(instance);
                }
            }
        }

        instances.sort_by(|a, b| {
            a.properties()
                .created_at
                .cmp(&b.properties().created_at)
                .then_with(|| a.name().cmp(b.name()))
        });

        debug!("Found {} running instance(s)", instances.len());
        Ok(instances)
    }

    /// Find a running instance by its exact name
    pub fn find_by_name(&self, name: &str) -> Result<Option<Instance>> {
        Ok(self.list()?.into_iter().find(|i| i.name() == name))
    }
}

/// Compute the registry directories in lookup order, without duplicates
pub fn default_dirs(registry_dir: Option<String>, tmpdir: Option<String>) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();

    if let Some(dir) = registry_dir.filter(|d| !d.is_empty()) {
        dirs.push(PathBuf::from(dir));
    }

    let tmp = tmpdir
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| registry::DEFAULT_TMPDIR.to_string());
    let trimmed = tmp.trim_end_matches('/');
    dirs.push(PathBuf::from(if trimmed.is_empty() { "/" } else { trimmed }));

    dirs.push(PathBuf::from(registry::SYSTEM_DIR));

    let mut unique = Vec::with_capacity(dirs.len());
    for dir in dirs {
        if !unique.contains(&dir) {
            unique.push(dir);
        }
    }
    unique
}

/// Load an instance directory, returning None when it is incomplete or stale
fn load_instance(path: &Path) -> Option<Instance> {
    if !path.is_dir() {
        return None;
    }

    if !path.join(registry::CREATION_FINALIZED_FILE).exists() {
        debug!("Skipping {}: creation not finalized", path.display());
        return None;
    }

    let properties_path = path.join(registry::PROPERTIES_FILE);
    let content = match fs::read_to_string(&properties_path) {
        Ok(c) => c,
        Err(e) => {
            debug!("Skipping {}: {}", properties_path.display(), e);
            return None;
        }
    };

    let properties: InstanceProperties = match serde_json::from_str(&content) {
        Ok(p) => p,
        Err(e) => {
            debug!("Skipping {}: invalid properties: {}", path.display(), e);
            return None;
        }
    };

    if !is_process_running(properties.watchdog_pid) {
        debug!(
            "Skipping {}: watchdog PID {} is not running",
            path.display(),
            properties.watchdog_pid
        );
        return None;
    }

    let credentials = AdminCredentials::load(path);
    Some(Instance::new(path.to_path_buf(), properties, credentials))
}

/// Check if a process with the given PID is running
///
/// EPERM means the process exists but belongs to another user, which is the
/// usual case for instances started by root.
#[cfg(unix)]
fn is_process_running(pid: u32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    if pid == 0 || pid > i32::MAX as u32 {
        return false;
    }
    match kill(Pid::from_raw(pid as i32), None) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_process_running(_pid: u32) -> bool {
    false
}
