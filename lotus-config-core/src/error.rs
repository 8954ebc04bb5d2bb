//! Error types for configuration building and loading
//!
//! Builders only ever produce well-formed values, so most of these variants
//! are raised on the load path when user overrides are decoded and checked.

use std::path::PathBuf;
use thiserror::Error;

use crate::policy::NetworkVersion;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Malformed duration '{input}': {reason}")]
    MalformedDuration { input: String, reason: String },

    #[error("Malformed token amount '{input}': {reason}")]
    MalformedTokenAmount { input: String, reason: String },

    #[error("Unknown retrieval pricing strategy '{0}' (expected \"default\" or \"external\")")]
    UnknownRetrievalPricingStrategy(String),

    #[error("Unknown resource filtering strategy '{0}' (expected \"hardware\" or \"disabled\")")]
    UnknownResourceFilteringStrategy(String),

    #[error("Network version {0} is not supported by the protocol policy")]
    UnsupportedNetworkVersion(NetworkVersion),

    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration value: {0}")]
    Decode(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    /// Create a validation error for a dotted field path
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn malformed_duration(input: &str, reason: impl Into<String>) -> Self {
        ConfigError::MalformedDuration {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_token_amount(input: &str, reason: impl Into<String>) -> Self {
        ConfigError::MalformedTokenAmount {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
