//! Error types for wrapper adaptation

use crate::config::ConfigError;
use thiserror::Error;

/// Errors raised by the capability registry, dispatcher and conversion service
#[derive(Debug, Error)]
pub enum ReactiveError {
    /// A caller-supplied argument was rejected before any dispatch happened
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No conversion path is registered for the requested pair
    #[error("No conversion registered from {from} to {to}")]
    UnsupportedConversion { from: String, to: String },

    /// A wrapper reached a code path that cannot handle it
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type using ReactiveError
pub type Result<T> = std::result::Result<T, ReactiveError>;
