mod config;

pub use config::{Config, SourceStatus, ViewConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/timelines[-dev]/` based on TIMELINES_ENV.
///
/// Set TIMELINES_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TIMELINES_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("timelines-dev")
    } else {
        base_dir.join("timelines")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirectoryUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
