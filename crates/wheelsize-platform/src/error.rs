//! Common error types for wheelsize-platform.

use thiserror::Error;

/// Platform-level errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("not supported on this platform")]
    Unsupported,
    #[error("failed to install mouse hook (os error {0})")]
    HookInstall(u32),
    #[error("hook thread failed: {0}")]
    HookThread(String),
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;
