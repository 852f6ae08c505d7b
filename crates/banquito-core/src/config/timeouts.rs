//! Centralized timeout configuration
//!
//! Default values for the driver timeouts. Both can be overridden via
//! configuration; provisioning adds no timeouts of its own.

use std::time::Duration;

/// Default timeout values for MongoDB connections
pub mod mongo {
    use super::*;

    /// Default TCP connect timeout (10 seconds)
    pub const CONNECT_SECS: u64 = 10;

    /// Default server selection timeout (30 seconds, the driver default)
    pub const SERVER_SELECTION_SECS: u64 = 30;

    /// Get connect timeout as Duration
    pub fn connect_timeout() -> Duration {
        Duration::from_secs(CONNECT_SECS)
    }

    /// Get server selection timeout as Duration
    pub fn server_selection_timeout() -> Duration {
        Duration::from_secs(SERVER_SELECTION_SECS)
    }
}
