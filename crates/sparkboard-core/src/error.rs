//! Core error types for sparkboard-core.
//!
//! Persistence read failures never show up here: stores fall back to their
//! documented defaults instead. What remains are write failures, upstream
//! (HTTP) failures, configuration problems and user input validation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for sparkboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Chat or forecast service errors
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Location lookup errors
    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors from the key/value persistence medium.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked by another writer
    #[error("Database is locked")]
    Locked,

    /// Value could not be encoded for storage
    #[error("Failed to encode value for key '{key}': {message}")]
    EncodeFailed { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
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

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Credential store failure
    #[error("Credential store error: {0}")]
    Credentials(String),
}

/// Failures talking to the chat proxy or the forecast service.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Connection, timeout or body read failure
    #[error("{service} request failed: {message}")]
    Transport { service: &'static str, message: String },

    /// Non-success HTTP status
    #[error("{service} returned HTTP {status}")]
    Status { service: &'static str, status: u16 },

    /// Body did not have the expected shape
    #[error("{service} returned an unexpected payload: {message}")]
    Malformed { service: &'static str, message: String },

    /// Service reported an error inside a success response
    #[error("{service} reported: {message}")]
    Rejected { service: &'static str, message: String },

    /// Required credential is absent
    #[error("{service} is not configured: {message}")]
    NotConfigured { service: &'static str, message: String },
}

/// Validation errors. The display text is shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required text field was empty after trimming
    #[error("{message}")]
    EmptyField { field: &'static str, message: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },

    /// A second request was issued while one is still in flight
    #[error("A request is already in progress")]
    Busy,
}

impl ValidationError {
    pub fn empty(field: &'static str, message: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field,
            message: message.into(),
        }
    }
}

/// Geolocation provider failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// No provider is available on this platform / configuration
    #[error("Location is not configured.")]
    Unsupported,

    /// Provider refused or failed to produce a position
    #[error("Unable to retrieve your location.")]
    Unavailable,
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => {
                if e.code == rusqlite::ErrorCode::DatabaseBusy
                    || e.code == rusqlite::ErrorCode::DatabaseLocked
                {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
