//! Configuration settings for lastbreath.
//!
//! Settings are loaded from `~/.lastbreath/config.yaml`. The file only seeds
//! the in-memory session configuration; adjustments made while the app runs
//! are not written back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::error::BreathError;
use crate::features::breathing::settings::{
    DEFAULT_DURATION, DEFAULT_REPS, DURATION_RANGE, REPS_RANGE,
};
use crate::features::breathing::{IdleDisplay, IdlePlaceholder, SessionConfig};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Session defaults.
    pub session: SessionDefaults,
    /// Feedback settings.
    pub feedback: FeedbackConfig,
    /// Display settings.
    pub display: DisplayConfig,
}

/// Default durations (seconds) and repetition count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SessionDefaults {
    pub inhale: u32,
    pub hold_after_inhale: u32,
    pub exhale: u32,
    pub hold_after_exhale: u32,
    pub reps: u32,
}

/// Feedback settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Ring the terminal bell on transitions.
    #[serde(default = "default_true")]
    pub bell: bool,
    /// Skip the bell when entering a hold.
    #[serde(default)]
    pub subtle: bool,
}

/// Display settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// What to show while idle.
    #[serde(default)]
    pub idle: IdlePlaceholder,
    /// Seconds shown while idle with `idle: fixed`.
    #[serde(default = "default_idle_seconds")]
    pub idle_seconds: u32,
    /// Repetitions shown while idle with `idle: fixed`.
    #[serde(default = "default_idle_reps")]
    pub idle_reps: u32,
}

// Default value functions for serde
const fn default_true() -> bool {
    true
}

const fn default_idle_seconds() -> u32 {
    4
}

const fn default_idle_reps() -> u32 {
    12
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            inhale: DEFAULT_DURATION,
            hold_after_inhale: DEFAULT_DURATION,
            exhale: DEFAULT_DURATION,
            hold_after_exhale: DEFAULT_DURATION,
            reps: DEFAULT_REPS,
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            bell: default_true(),
            subtle: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            idle: IdlePlaceholder::default(),
            idle_seconds: default_idle_seconds(),
            idle_reps: default_idle_reps(),
        }
    }
}

impl SessionDefaults {
    /// Validate and convert into a session configuration.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::Config` naming the first out-of-range field.
    pub fn to_session_config(&self) -> Result<SessionConfig, BreathError> {
        let durations = [
            ("inhale", self.inhale),
            ("hold_after_inhale", self.hold_after_inhale),
            ("exhale", self.exhale),
            ("hold_after_exhale", self.hold_after_exhale),
        ];
        for (field, value) in durations {
            if !DURATION_RANGE.contains(&value) {
                return Err(BreathError::Config(format!(
                    "session.{field} must be between {} and {} seconds, got {value}",
                    DURATION_RANGE.start(),
                    DURATION_RANGE.end()
                )));
            }
        }
        if !REPS_RANGE.contains(&self.reps) {
            return Err(BreathError::Config(format!(
                "session.reps must be between {} and {}, got {}",
                REPS_RANGE.start(),
                REPS_RANGE.end(),
                self.reps
            )));
        }

        SessionConfig::new(
            self.inhale,
            self.hold_after_inhale,
            self.exhale,
            self.hold_after_exhale,
            self.reps,
        )
        .ok_or_else(|| BreathError::Config("invalid session configuration".to_string()))
    }
}

impl DisplayConfig {
    /// Idle display policy for renderers.
    #[must_use]
    pub const fn idle_display(&self) -> IdleDisplay {
        IdleDisplay {
            placeholder: self.idle,
            fixed_seconds: self.idle_seconds,
            fixed_reps: self.idle_reps,
        }
    }
}

impl Config {
    /// Config file to read: `path` when given, else the default location.
    #[must_use]
    pub fn resolve_path(path: Option<&Path>) -> PathBuf {
        path.map_or_else(|| Paths::default().config_file, Path::to_path_buf)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read, parsed,
    /// or validated.
    pub fn load_from_path(path: &Path) -> Result<Self, BreathError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            BreathError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            BreathError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        config.session.to_session_config()?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Session configuration seeded from the file.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::Config` if a value is out of range.
    pub fn session_config(&self) -> Result<SessionConfig, BreathError> {
        self.session.to_session_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::breathing::PhaseKind;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.session.inhale, 5);
        assert_eq!(config.session.reps, 5);
        assert!(config.feedback.bell);
        assert!(!config.feedback.subtle);
        assert_eq!(config.display.idle, IdlePlaceholder::Preview);
        assert_eq!(config.session_config().unwrap(), SessionConfig::default());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        // Should return defaults when file doesn't exist
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
session:
  inhale: 4
  hold_after_inhale: 7
  exhale: 8
display:
  idle: fixed
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();
        let session = config.session_config().unwrap();

        assert_eq!(session.duration(PhaseKind::Inhale), 4);
        assert_eq!(session.duration(PhaseKind::HoldAfterInhale), 7);
        assert_eq!(session.duration(PhaseKind::Exhale), 8);
        // Defaults should be used for missing fields
        assert_eq!(session.duration(PhaseKind::HoldAfterExhale), 5);
        assert_eq!(session.reps(), 5);
        assert!(config.feedback.bell);

        let idle = config.display.idle_display();
        assert_eq!(idle.placeholder, IdlePlaceholder::Fixed);
        assert_eq!(idle.fixed_seconds, 4);
        assert_eq!(idle.fixed_reps, 12);
    }

    #[test]
    fn test_out_of_range_config_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "session:\n  exhale: 45\n").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, BreathError::Config(_)));
        assert!(err.to_string().contains("session.exhale"));
    }

    #[test]
    fn test_resolve_path_prefers_override() {
        let path = Path::new("/tmp/custom.yaml");
        assert_eq!(Config::resolve_path(Some(path)), path.to_path_buf());
        assert!(Config::resolve_path(None).ends_with("config.yaml"));
    }

    #[test]
    fn test_reps_out_of_range() {
        let defaults = SessionDefaults {
            reps: 0,
            ..SessionDefaults::default()
        };
        let err = defaults.to_session_config().unwrap_err();
        assert!(err.to_string().contains("session.reps"));
    }

    #[test]
    fn test_malformed_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "session: [1, 2").unwrap();

        assert!(Config::load_from_path(&config_path).is_err());
    }
}
