//! Path resolution for lastbreath configuration.
//!
//! lastbreath reads from `~/.lastbreath/`:
//! - `config.yaml` - Startup defaults (never written by the app)

use std::path::PathBuf;

use crate::error::BreathError;

/// Paths to lastbreath configuration files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.lastbreath/`
    pub root: PathBuf,
    /// Config file: `~/.lastbreath/config.yaml`
    pub config_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, BreathError> {
        let home = std::env::var("HOME").map_err(|_| {
            BreathError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".lastbreath")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            root,
        }
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".lastbreath"))
        })
    }
}
