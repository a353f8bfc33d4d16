//! Client configuration types.

use std::time::Duration;

/// Configuration for connecting to a catalog server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server (e.g., "http://localhost:5000")
    pub url: String,
    /// Total time allowed for a single request
    pub timeout: Duration,
    /// Time allowed to establish a connection
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Create a new config with default timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
