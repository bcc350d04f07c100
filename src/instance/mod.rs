//! Running instance discovery and selection
//!
//! Reads the on-disk instance registry, loads full admin credentials and
//! picks the instance a command should talk to.

mod credentials;
mod models;
mod registry;
mod select;

pub use credentials::AdminCredentials;
pub use models::{Instance, InstanceProperties};
pub use registry::{default_dirs, InstanceRegistry};
pub use select::select_instance;
