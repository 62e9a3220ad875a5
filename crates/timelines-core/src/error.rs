//! Core error types for timelines-core.
//!
//! The date-scale engine is total and has no error path. Everything that
//! can fail (configuration, data sources, event construction) reports
//! through the hierarchy below.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::source::DataSourceKind;

/// Core error type for timelines-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Data source errors
    #[error("Data source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by data source connectors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// A connection parameter required by the source kind is absent
    #[error("{kind} data source is missing '{parameter}'")]
    MissingParameter {
        kind: DataSourceKind,
        parameter: &'static str,
    },

    /// The endpoint could not be turned into a URL
    #[error("Invalid endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// Fetching from the source failed
    #[error("Failed to fetch events from {kind} data source: {reason}")]
    FetchFailed {
        kind: DataSourceKind,
        reason: String,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not name a configuration value
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// No usable configuration directory
    #[error("Configuration directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// End date before start date
    #[error("Invalid date range: end ({end}) must not precede start ({start})")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
