// src/error.rs

//! Unified error handling for the statistics generator.
//!
//! Deliberately small: corrupt inputs degrade to defaults in the loader and
//! delivery failures surface as `NotifyStatus`, so only I/O on the report
//! target and configuration problems ever become hard errors.

use thiserror::Error;

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
