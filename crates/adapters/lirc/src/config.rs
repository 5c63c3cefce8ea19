//! LIRC configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Configuration for the `irsend` dispatcher.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LircConfig {
    /// Path to the `irsend` executable.
    pub irsend_path: PathBuf,
    /// How many times `irsend` repeats each code (`--count`).
    pub repeat_count: u32,
}

impl Default for LircConfig {
    fn default() -> Self {
        Self {
            irsend_path: PathBuf::from("/usr/bin/irsend"),
            repeat_count: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = LircConfig::default();
        assert_eq!(config.irsend_path, PathBuf::from("/usr/bin/irsend"));
        assert_eq!(config.repeat_count, 5);
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let config: LircConfig = toml::from_str(r#"irsend_path = "/opt/lirc/irsend""#).unwrap();
        assert_eq!(config.irsend_path, PathBuf::from("/opt/lirc/irsend"));
        assert_eq!(config.repeat_count, 5);
    }
}
