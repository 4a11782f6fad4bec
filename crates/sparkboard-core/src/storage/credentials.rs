//! Thin wrapper around the OS keyring for the forecast API key.
//!
//! `SPARKBOARD_FORECAST_KEY` takes precedence over the keyring entry so the
//! key can be supplied in environments without a secret service.

use crate::error::ConfigError;

const SERVICE: &str = "sparkboard";
const FORECAST_KEY_ENTRY: &str = "forecast_api_key";
pub const FORECAST_KEY_ENV: &str = "SPARKBOARD_FORECAST_KEY";

fn entry(key: &str) -> Result<keyring::Entry, ConfigError> {
    keyring::Entry::new(SERVICE, key).map_err(|e| ConfigError::Credentials(e.to_string()))
}

pub fn get(key: &str) -> Result<Option<String>, ConfigError> {
    match entry(key)?.get_password() {
        Ok(pw) => Ok(Some(pw)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(ConfigError::Credentials(e.to_string())),
    }
}

pub fn set(key: &str, value: &str) -> Result<(), ConfigError> {
    entry(key)?
        .set_password(value)
        .map_err(|e| ConfigError::Credentials(e.to_string()))
}

pub fn delete(key: &str) -> Result<(), ConfigError> {
    match entry(key)?.delete_credential() {
        Ok(()) => Ok(()),
        Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(ConfigError::Credentials(e.to_string())),
    }
}

/// Forecast API key from the environment, then the keyring.
pub fn forecast_api_key() -> Option<String> {
    if let Some(key) = std::env::var(FORECAST_KEY_ENV)
        .ok()
        .filter(|k| !k.trim().is_empty())
    {
        return Some(key);
    }
    match get(FORECAST_KEY_ENTRY) {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!(error = %e, "keyring lookup failed");
            None
        }
    }
}

pub fn set_forecast_api_key(value: &str) -> Result<(), ConfigError> {
    set(FORECAST_KEY_ENTRY, value.trim())
}

pub fn clear_forecast_api_key() -> Result<(), ConfigError> {
    delete(FORECAST_KEY_ENTRY)
}
