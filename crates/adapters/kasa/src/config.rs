//! Outlet connection configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for a Kasa outlet.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KasaConfig {
    /// Hostname or IP address of the outlet. Required.
    pub host: String,
    /// TCP port of the local protocol.
    pub port: u16,
    /// Upper bound for one query (connect, send and receive), in milliseconds.
    pub timeout_ms: u64,
}

impl KasaConfig {
    /// Default port of the local protocol.
    pub const DEFAULT_PORT: u16 = 9999;

    /// Configuration for `host` with default port and timeout.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for KasaConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: Self::DEFAULT_PORT,
            timeout_ms: 2_000,
        }
    }
}
