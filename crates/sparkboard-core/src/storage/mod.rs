mod config;
pub mod credentials;
pub mod database;
pub mod keys;
pub mod kv;

pub use config::{ChatConfig, CoachConfig, Config, ForecastConfig, GratitudeConfig, LocationConfig};
pub use database::Database;
pub use kv::{load_json, save_json, KvStore, MemoryKv};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/sparkboard[-dev]/` based on SPARKBOARD_ENV.
///
/// Set SPARKBOARD_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SPARKBOARD_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("sparkboard-dev")
    } else {
        base_dir.join("sparkboard")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
