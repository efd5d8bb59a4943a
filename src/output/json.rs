//! JSON output formatting for lastbreath.

use serde::Serialize;
use serde_json::json;

use crate::config::Config;
use crate::error::BreathError;
use crate::features::breathing::SessionSnapshot;

/// Format one snapshot as a single JSON line (NDJSON streaming output).
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn format_transition_json(
    snapshot: &SessionSnapshot,
    elapsed_seconds: u32,
) -> Result<String, BreathError> {
    let output = json!({
        "elapsed_seconds": elapsed_seconds,
        "snapshot": snapshot,
    });
    Ok(serde_json::to_string(&output)?)
}

/// Format the effective configuration with its source path.
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn format_config_json(config: &Config, path: &std::path::Path) -> Result<String, BreathError> {
    let output = json!({
        "path": path.display().to_string(),
        "config": config,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Serialize any value as pretty JSON.
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, BreathError> {
    Ok(serde_json::to_string_pretty(value)?)
}
