//! Instance data models

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::credentials::AdminCredentials;

/// Contents of an instance's `properties.json`
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceProperties {
    /// Unique instance name
    pub name: String,
    /// PID of the supervising watchdog
    pub watchdog_pid: u32,
    #[serde(default)]
    pub server_software: Option<String>,
    #[serde(default)]
    pub integration_mode: Option<String>,
    #[serde(default)]
    pub passenger_version: Option<String>,
    /// Unix timestamp (seconds)
    #[serde(default)]
    pub created_at: Option<i64>,
}

/// A running instance discovered in the registry
#[derive(Debug, Clone)]
pub struct Instance {
    dir: PathBuf,
    properties: InstanceProperties,
    credentials: Option<AdminCredentials>,
}

impl Instance {
    pub fn new(
        dir: PathBuf,
        properties: InstanceProperties,
        credentials: Option<AdminCredentials>,
    ) -> Self {
        Self {
            dir,
            properties,
            credentials,
        }
    }

    pub fn name(&self) -> &str {
        &self.properties.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn properties(&self) -> &InstanceProperties {
        &self.properties
    }

    /// Full admin credentials, if the password file was readable
    pub fn credentials(&self) -> Option<&AdminCredentials> {
        self.credentials.as_ref()
    }

    /// Absolute path of a control socket such as `agents.s/core_api`
    pub fn socket_path(&self, socket_name: &str) -> PathBuf {
        self.dir.join(socket_name)
    }

    /// Short human-readable description, e.g. "nginx (standalone)"
    pub fn description(&self) -> String {
        match (
            &self.properties.server_software,
            &self.properties.integration_mode,
        ) {
            (Some(software), Some(mode)) => format!("{} ({})", software, mode),
            (Some(software), None) => software.clone(),
            (None, Some(mode)) => mode.clone(),
            (None, None) => "-".to_string(),
        }
    }

    /// Creation time formatted for display
    pub fn created_at_display(&self) -> String {
        self.properties
            .created_at
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}
