//! Core error types

use thiserror::Error;

/// Errors raised by the session layer
///
/// A malformed or expired token is never an error here; those surface as
/// `None`/`false` from the token helpers.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The token store rejected a read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// No async runtime is available to drive a timer
    #[error("No runtime available to drive the expiry watcher")]
    NoRuntime,
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(not(target_arch = "wasm32"))]
impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
