//! Config inspection commands.

use std::path::Path;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::Config;
use crate::error::BreathError;
use crate::output::format_config;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn config(
    config: &Config,
    path: &Path,
    cmd: &ConfigCommands,
    format: OutputFormat,
) -> Result<String, BreathError> {
    match cmd {
        ConfigCommands::Show => format_config(config, path, format),
        ConfigCommands::Path => match format {
            OutputFormat::Pretty => Ok(path.display().to_string()),
            OutputFormat::Json => Ok(serde_json::json!({ "path": path.display().to_string() }).to_string()),
        },
    }
}
