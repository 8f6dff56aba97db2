//! Meter configuration
//!
//! This module re-exports the shared config type from swingmeter-types and
//! provides platform defaults and persistence for it.

use std::path::PathBuf;

pub use swingmeter_types::{DEFAULT_COMBAT_TIMEOUT_SECS, MAX_HISTORY, MeterConfig};

use super::error::ConfigError;

const APP_NAME: &str = "swingmeter";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Defaults
// ─────────────────────────────────────────────────────────────────────────────

fn default_data_directory() -> String {
    dirs::data_dir()
        .map(|p| p.join(APP_NAME))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────────
// MeterConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for MeterConfig persistence
pub trait MeterConfigExt: Sized {
    fn load() -> Self;
    fn load_with_defaults() -> Self;
    fn try_load() -> Result<Self, ConfigError>;
    fn save(&self) -> Result<(), ConfigError>;
    /// Directory holding character records, falling back to the platform default.
    fn data_path(&self) -> PathBuf;
}

impl MeterConfigExt for MeterConfig {
    fn load() -> Self {
        Self::try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::load_with_defaults()
        })
    }

    /// Load with platform-specific defaults (used when no config file exists)
    fn load_with_defaults() -> Self {
        MeterConfig::with_data_directory(default_data_directory())
    }

    fn try_load() -> Result<Self, ConfigError> {
        let mut config: MeterConfig = confy::load(APP_NAME, CONFIG_NAME)?;
        if config.data_directory.is_empty() {
            config.data_directory = default_data_directory();
        }
        Ok(config)
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn data_path(&self) -> PathBuf {
        if self.data_directory.is_empty() {
            PathBuf::from(default_data_directory())
        } else {
            PathBuf::from(&self.data_directory)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_path_prefers_configured_directory() {
        let config = MeterConfig::with_data_directory("/tmp/meter".to_string());
        assert_eq!(config.data_path(), PathBuf::from("/tmp/meter"));
    }

    #[test]
    fn defaults_match_shared_constants() {
        let config = MeterConfig::default();
        assert_eq!(config.combat_timeout_secs, DEFAULT_COMBAT_TIMEOUT_SECS);
        assert!(config.autosave);
        assert_eq!(config.character, "default");
    }
}
