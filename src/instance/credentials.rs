//! Full admin credentials stored inside an instance directory

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::admin;

/// Basic auth credentials granting full admin access to an instance
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    user: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(user: &str, password: &str) -> Self {
        Self {
            user: user.to_string(),
            password: password.to_string(),
        }
    }

    /// Load the full admin password from the instance directory.
    ///
    /// The password file is normally only readable by the user that started
    /// the instance, so a missing or unreadable file is not an error: requests
    /// are then sent without credentials and the agent decides.
    pub fn load(instance_dir: &Path) -> Option<Self> {
        let path = instance_dir.join(admin::FULL_ADMIN_PASSWORD_FILE);
        match fs::read_to_string(&path) {
            Ok(content) => {
                let password = content.trim_end();
                if password.is_empty() {
                    debug!("Full admin password file {} is empty", path.display());
                    return None;
                }
                debug!("Loaded full admin credentials from {}", path.display());
                Some(Self::new(admin::FULL_ADMIN_USER, password))
            }
            Err(e) => {
                debug!(
                    "Full admin credentials unavailable ({}): {}",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        let raw = format!("{}:{}", self.user, self.password);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}
