//! Error types for Lumen
//!
//! Provides standardized error handling across the library. Provider
//! boundaries catch these, log them, and downgrade them to absence or an
//! empty collection; nothing in here is surfaced to a frontend as fatal.

use thiserror::Error;

/// Errors that can occur in Lumen
#[derive(Debug, Error)]
pub enum LumenError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Weather API request errors
    #[error("Weather request error: {0}")]
    WeatherRequest(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("Config write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),
}

/// Result type alias for Lumen operations
pub type LumenResult<T> = Result<T, LumenError>;
