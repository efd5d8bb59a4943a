//! Error types for lastbreath.
//!
//! The breathing core itself never fails: rejected commands are reported as
//! `false` return values. These errors cover the surrounding application:
//! configuration loading, terminal setup, and output serialization.

use thiserror::Error;

/// Application error type.
#[derive(Debug, Error)]
pub enum BreathError {
    /// Configuration could not be located, read, or validated.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O failure (stdout, config file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Terminal setup, drawing, or input failure.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl BreathError {
    /// Build a terminal error from any displayable cause.
    pub fn terminal(context: &str, err: impl std::fmt::Display) -> Self {
        Self::Terminal(format!("{context}: {err}"))
    }
}
