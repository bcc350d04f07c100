//! Agent admin API client
//!
//! Each agent of an instance serves a small HTTP admin API on a Unix socket
//! under the instance directory.

mod message;
mod socket;

pub use message::{AdminRequest, AdminResponse, AgentErrorBody};
pub use socket::AdminSocket;
