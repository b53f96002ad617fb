//! Error types for the wingman application.
//!
//! Flight time errors come from `wingman-core` and are wrapped here alongside
//! the errors of loading configuration and logbook files.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for wingman operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Flight Time Errors ===
    /// A flight time computation failed.
    #[error(transparent)]
    Core(#[from] wingman_core::Error),

    /// A specific logbook entry failed validation.
    #[error("entry {index} ({date}): {source}")]
    InvalidEntry {
        /// Zero-based position of the entry in the logbook.
        index: usize,
        /// Date of the entry.
        date: chrono::NaiveDate,
        /// The underlying error.
        #[source]
        source: wingman_core::Error,
    },

    // === Logbook Errors ===
    /// Failed to read the logbook file.
    #[error("failed to read logbook at {path}: {source}")]
    LogbookRead {
        /// Path to the logbook file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The logbook file is not a valid list of flights.
    #[error("failed to parse logbook at {path}: {source}")]
    LogbookParse {
        /// Path to the logbook file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Output Errors ===
    /// A report could not be rendered as JSON.
    #[error("failed to render JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for wingman operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }
}
