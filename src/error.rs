//! Error types shared across the resource, deferred and config layers

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single remote collection fetch.
///
/// Cloneable so it can live inside an observable `LoadState`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("Connection failed: {0}")]
    Transport(String),

    #[error("Service responded {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed record in '{collection}': {message}")]
    Decode { collection: String, message: String },

    #[error("Service error: {0}")]
    Service(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Transport("request timed out".to_string())
        } else if e.is_decode() {
            FetchError::Service(format!("unreadable response body: {}", e))
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// Failure to obtain the code behind a deferred section.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeferredError {
    #[error("Failed to load deferred module: {0}")]
    ModuleLoad(String),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}
