//! Output formatting for lastbreath.
//!
//! This module provides formatters for displaying sessions, plans and
//! configuration in various formats.

mod json;
mod pretty;

use std::path::Path;

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::BreathError;
use crate::features::breathing::{SessionPlan, SessionSnapshot, SessionSummary};

pub use json::*;
pub use pretty::*;

/// Format a phase change based on output format
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn format_transition(
    snapshot: &SessionSnapshot,
    elapsed_seconds: u32,
    format: OutputFormat,
) -> Result<String, BreathError> {
    match format {
        OutputFormat::Pretty => Ok(format_transition_pretty(snapshot, elapsed_seconds)),
        OutputFormat::Json => format_transition_json(snapshot, elapsed_seconds),
    }
}

/// Format a session summary based on output format
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn format_summary(summary: &SessionSummary, format: OutputFormat) -> Result<String, BreathError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary)),
        OutputFormat::Json => Ok(serde_json::to_string(summary)?),
    }
}

/// Format a session plan based on output format
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn format_plan(plan: &SessionPlan, format: OutputFormat) -> Result<String, BreathError> {
    match format {
        OutputFormat::Pretty => Ok(format_plan_pretty(plan)),
        OutputFormat::Json => to_json(plan),
    }
}

/// Format the effective configuration based on output format
///
/// # Errors
///
/// Returns `BreathError::Parse` if JSON serialization fails.
pub fn format_config(config: &Config, path: &Path, format: OutputFormat) -> Result<String, BreathError> {
    match format {
        OutputFormat::Pretty => Ok(format_config_pretty(config, path)),
        OutputFormat::Json => format_config_json(config, path),
    }
}
