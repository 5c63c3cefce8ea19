//! Configuration loading: TOML file with environment variable overrides.
//!
//! The file path is the first command-line argument, else `FLICKER_CONFIG`,
//! else `flicker.toml` in the working directory. Everything but the outlet
//! host and the remote's `power` button has a default. Environment variables
//! take precedence over file values.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use flicker_adapter_kasa::KasaConfig;
use flicker_adapter_lirc::LircConfig;
use flicker_app::appliance::Timing;
use flicker_domain::remote::{POWER_BUTTON, Remote, RemoteMap};
use flicker_domain::threshold::HeatThresholds;

const DEFAULT_PATH: &str = "flicker.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// `irsend` settings.
    pub lirc: LircConfig,
    /// Smart outlet measuring the appliance.
    pub outlet: KasaConfig,
    /// Watt thresholds between heat levels.
    pub thresholds: HeatThresholds,
    /// Confirmation loop deadlines.
    pub timing: TimingConfig,
    /// The appliance's remote.
    pub remote: RemoteConfig,
    /// Additional remotes reachable through `/send/{remote}/{command}`.
    pub remotes: BTreeMap<String, RemoteMap>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Deadlines of the power and heat confirmation loops.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub power: LoopConfig,
    pub heat: LoopConfig,
}

/// One confirmation loop, in milliseconds.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LoopConfig {
    pub deadline_ms: u64,
    pub attempt_ms: u64,
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,
}

/// The remote that drives the appliance.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// LIRC name of the remote.
    pub name: String,
    /// Button name to key code. Must contain `power`.
    pub buttons: RemoteMap,
}

impl Config {
    /// Load configuration from the resolved path (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be read, if the
    /// TOML is malformed, or if the result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::args()
            .nth(1)
            .or_else(|| std::env::var("FLICKER_CONFIG").ok());
        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => Self::from_default_file(DEFAULT_PATH)?,
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Like [`from_file`](Self::from_file), but a missing file yields the
    /// defaults.
    fn from_default_file(path: &str) -> Result<Self, ConfigError> {
        match Self::from_file(path) {
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(Self::default())
            }
            other => other,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("FLICKER_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("FLICKER_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("FLICKER_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("FLICKER_OUTLET") {
            self.outlet.host = val;
        }
        if let Ok(val) = std::env::var("FLICKER_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.outlet.host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "outlet.host must name the smart outlet".to_string(),
            ));
        }
        if !self.remote.buttons.contains(POWER_BUTTON) {
            return Err(ConfigError::Validation(
                "remote.buttons must define a power button".to_string(),
            ));
        }
        if self.remote.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "remote.name must not be empty".to_string(),
            ));
        }
        self.timing.power.validate("timing.power")?;
        self.timing.heat.validate("timing.heat")?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// The additional remotes, ready for the relay.
    pub fn relay_remotes(&self) -> impl Iterator<Item = Remote> + '_ {
        self.remotes
            .iter()
            .map(|(name, buttons)| Remote::new(name.as_str(), buttons))
    }
}

impl LoopConfig {
    fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if self.deadline_ms == 0 || self.attempt_ms == 0 || self.poll_ms == 0 {
            return Err(ConfigError::Validation(format!(
                "{section} durations must be positive"
            )));
        }
        if self.poll_ms >= self.attempt_ms {
            return Err(ConfigError::Validation(format!(
                "{section}.poll_ms must be shorter than attempt_ms"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn timing(&self) -> Timing {
        Timing {
            deadline: Duration::from_millis(self.deadline_ms),
            attempt: Duration::from_millis(self.attempt_ms),
            poll_interval: Duration::from_millis(self.poll_ms),
        }
    }
}

fn default_poll_ms() -> u64 {
    250
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "flickerd=info,flicker_app=info,flicker_adapter_kasa=info,flicker_adapter_lirc=info,tower_http=debug"
                .to_string(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            power: LoopConfig {
                deadline_ms: 30_000,
                attempt_ms: 15_000,
                poll_ms: default_poll_ms(),
            },
            heat: LoopConfig {
                deadline_ms: 60_000,
                attempt_ms: 20_000,
                poll_ms: default_poll_ms(),
            },
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            name: "fireplace".to_string(),
            buttons: RemoteMap::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
