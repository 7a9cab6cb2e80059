//! Domain error types

use thiserror::Error;

/// Error when parsing a pause expression
#[derive(Debug, Clone, Error)]
#[error("Invalid pause time: \"{input}\". Expected HH:MM (24h)")]
pub struct PauseParseError {
    pub input: String,
}

/// Error when a pause duration is not positive
#[derive(Debug, Clone, Error)]
#[error("Pause duration must be positive, got {minutes} minutes")]
pub struct NonPositivePauseError {
    pub minutes: i64,
}

/// Error when parsing a quiet-hours span
#[derive(Debug, Clone, Error)]
#[error("Invalid quiet hours: \"{input}\". Expected HH:MM-HH:MM (24h)")]
pub struct QuietHoursParseError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
