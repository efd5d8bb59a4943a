//! Session plan command.

use crate::cli::args::{OutputFormat, SessionArgs};
use crate::config::Config;
use crate::error::BreathError;
use crate::features::breathing::SessionPlan;
use crate::output::format_plan;

/// Execute the plan command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or output formatting
/// fails.
pub fn plan(config: &Config, args: &SessionArgs, format: OutputFormat) -> Result<String, BreathError> {
    let session = args.apply(config.session_config()?)?;
    format_plan(&SessionPlan::new(&session), format)
}
