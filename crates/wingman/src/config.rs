//! Configuration management for wingman.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use wingman_core::MAX_MONTHS;

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "wingman";

/// Default logbook file name.
const LOGBOOK_FILE_NAME: &str = "logbook.json";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `WINGMAN_`)
/// 2. TOML config file at `~/.config/wingman/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logbook configuration.
    pub logbook: LogbookConfig,
    /// Report configuration.
    pub report: ReportConfig,
    /// Entry validation configuration.
    pub validation: ValidationConfig,
}

/// Logbook-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogbookConfig {
    /// Path to the logbook file.
    /// Defaults to `~/.local/share/wingman/logbook.json`
    pub path: Option<PathBuf>,
}

/// Report-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of aircraft shown in usage reports.
    /// Set to 0 for unlimited.
    pub aircraft_limit: usize,
    /// Number of calendar months in the monthly breakdown.
    pub months: u32,
}

/// Bounds applied by `wingman check` on top of the category rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Shortest acceptable flight, in minutes.
    pub min_flight_minutes: u32,
    /// Longest acceptable flight, in minutes.
    pub max_flight_minutes: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            aircraft_limit: 5,
            months: 12,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_flight_minutes: 6,    // 0.1 h
            max_flight_minutes: 1440, // 24 h
        }
    }
}

impl Config {
    /// Load configuration, reading the TOML file at `config_path` or at
    /// [`Config::default_config_path`].
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `WINGMAN_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("WINGMAN_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.report.months == 0 {
            return Err(Error::config_validation(
                "report.months must be greater than 0",
            ));
        }

        if self.report.months > MAX_MONTHS {
            return Err(Error::config_validation(format!(
                "report.months cannot be greater than {MAX_MONTHS}"
            )));
        }

        if self.validation.min_flight_minutes > self.validation.max_flight_minutes {
            return Err(Error::config_validation(format!(
                "min_flight_minutes ({}) cannot be greater than max_flight_minutes ({})",
                self.validation.min_flight_minutes, self.validation.max_flight_minutes
            )));
        }

        Ok(())
    }

    /// Get the logbook path, resolving defaults if not set.
    #[must_use]
    pub fn logbook_path(&self) -> PathBuf {
        self.logbook
            .path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(LOGBOOK_FILE_NAME))
    }

    /// Get the aircraft usage limit, `None` meaning unlimited.
    #[must_use]
    pub fn aircraft_limit(&self) -> Option<usize> {
        match self.report.aircraft_limit {
            0 => None,
            n => Some(n),
        }
    }
}
