//! Configuration management for lastbreath.
//!
//! Startup defaults are read from `~/.lastbreath/config.yaml`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, DisplayConfig, FeedbackConfig, SessionDefaults};
