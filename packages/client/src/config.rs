//! Runtime configuration of the terminal client.

use std::time::Duration;

pub const DEFAULT_URL: &str = "ws://127.0.0.1:3001/ws";
pub const DEFAULT_MAX_RECONNECT_ATTEMPTS: u32 = 5;
pub const DEFAULT_RECONNECT_INTERVAL_SECS: u64 = 5;

/// Settings shared by every session of one client process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// WebSocket URL of the coordinator
    pub url: String,
    /// Name submitted automatically once the coordinator greets us
    pub username: Option<String>,
    /// Reconnection attempts before giving up
    pub max_reconnect_attempts: u32,
    /// Pause between reconnection attempts
    pub reconnect_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            username: None,
            max_reconnect_attempts: DEFAULT_MAX_RECONNECT_ATTEMPTS,
            reconnect_interval: Duration::from_secs(DEFAULT_RECONNECT_INTERVAL_SECS),
        }
    }
}
