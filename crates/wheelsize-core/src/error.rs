//! Error types for wheelsize-core.

use thiserror::Error;

/// Errors loading or saving the resize configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A failed OS query or command for a single window.
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("{call} failed (os error {code})")]
    Os { call: &'static str, code: u32 },
    #[error("not supported on this platform")]
    Unsupported,
}
