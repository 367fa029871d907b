use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::recommender::DEFAULT_TOP_N;
use crate::core::tables::EngineTables;
use crate::core::Recommender;
use crate::error::EngineError;

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: EngineTables,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self { default_limit: default_limit() }
    }
}

fn default_limit() -> usize { DEFAULT_TOP_N }

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "full".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the structs
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CARMATCH)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CARMATCH__MATCHING__DEFAULT_LIMIT -> matching.default_limit
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Build an engine from the loaded scoring tables
    pub fn recommender(&self) -> Result<Recommender, EngineError> {
        Ok(Recommender::new(self.scoring.clone())?.with_default_top_n(self.matching.default_limit))
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CARMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.matching.default_limit, 10);
        assert_eq!(settings.scoring.budget.tolerance, 0.15);
        assert_eq!(settings.scoring.preference.no_signal, 0.3);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "full");
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        // Test binaries run from the crate root, where config/default.toml lives
        let settings = Settings::load().unwrap();
        let defaults = Settings::default();

        assert_eq!(settings.scoring, defaults.scoring);
        assert_eq!(settings.matching, defaults.matching);
        assert_eq!(settings.logging, defaults.logging);
    }

    #[test]
    fn test_recommender_from_settings() {
        let mut settings = Settings::default();
        settings.matching.default_limit = 4;
        assert!(settings.recommender().is_ok());

        settings.scoring.budget.tolerance = 2.0;
        assert!(settings.recommender().is_err());
    }
}
