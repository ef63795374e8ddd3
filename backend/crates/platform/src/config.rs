//! Environment configuration helpers
//!
//! Thin wrappers over `std::env` used by the API binary when it assembles
//! per-crate config structs.

use std::env;
use std::str::FromStr;

use base64::{Engine, engine::general_purpose};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(String),

    #[error("{key} has an invalid value: {reason}")]
    Invalid { key: String, reason: String },
}

/// Value of `key`, or `default` when unset
pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Value of `key`, or an error when unset
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key.to_string()))
}

/// Parse `key`, falling back to `default` when unset
pub fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Optional raw bytes of `key`
pub fn env_bytes(key: &str) -> Option<Vec<u8>> {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .map(String::into_bytes)
}

/// Decode a standard-base64 32-byte secret
pub fn decode_secret(key: &str, encoded: &str) -> Result<[u8; 32], ConfigError> {
    let bytes = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| ConfigError::Invalid {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

    bytes.try_into().map_err(|b: Vec<u8>| ConfigError::Invalid {
        key: key.to_string(),
        reason: format!("expected 32 bytes, got {}", b.len()),
    })
}

/// Read and decode a 32-byte secret from the environment
pub fn secret_from_env(key: &str) -> Result<[u8; 32], ConfigError> {
    let encoded = env_required(key)?;
    decode_secret(key, &encoded)
}

/// Comma-separated list, blanks dropped
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
