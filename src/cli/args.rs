use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::BreathError;
use crate::features::breathing::settings::{DURATION_RANGE, REPS_RANGE};
use crate::features::breathing::{PhaseKind, SessionConfig};

#[derive(Parser)]
#[command(name = "lastbreath")]
#[command(about = "A guided box-breathing timer for the terminal")]
#[command(long_about = "lastbreath - guided box breathing

Walks you through timed cycles of inhale, hold, exhale, hold for a set
number of repetitions, with a breathing animation and a terminal bell on
every transition.

QUICK START:
  lastbreath                 Open the interactive breathing screen
  lastbreath run             Breathe along in plain text
  lastbreath run --reps 3    Three repetitions only
  lastbreath plan            Show what a session will look like

Durations are in seconds (1-30); repetitions range from 1 to 10.
Defaults come from ~/.lastbreath/config.yaml when present.")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Path to the configuration file
    ///
    /// Defaults to ~/.lastbreath/config.yaml.
    #[arg(short, long, global = true, env = "LASTBREATH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Command to run; opens the interactive screen when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive breathing screen
    ///
    /// Keys:
    ///   space/enter   Start or stop a session
    ///   s             Show or hide settings
    ///   j/k, up/down  Select a setting
    ///   h/l, -/+      Adjust the selected setting (only while stopped)
    ///   ?             Help
    ///   q/esc         Quit
    Tui,

    /// Run a session in plain text
    ///
    /// Prints one line per phase change. With --output json every line is a
    /// JSON object, followed by a summary object.
    ///
    /// Examples:
    ///   lastbreath run                       Use configured defaults
    ///   lastbreath run --inhale 4 --hold-in 7 --exhale 8 --hold-out 1
    ///   lastbreath run --fast -o json        Simulate without waiting
    Run(RunArgs),

    /// Show the plan for a session without running it
    ///
    /// Examples:
    ///   lastbreath plan
    ///   lastbreath plan --reps 10 -o json
    Plan(SessionArgs),

    /// Inspect configuration
    Config(ConfigArgs),
}

/// Overrides for the configured session.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Inhale duration in seconds
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=30))]
    pub inhale: Option<u32>,

    /// Hold after inhale in seconds
    #[arg(long = "hold-in", value_parser = clap::value_parser!(u32).range(1..=30))]
    pub hold_in: Option<u32>,

    /// Exhale duration in seconds
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=30))]
    pub exhale: Option<u32>,

    /// Hold after exhale in seconds
    #[arg(long = "hold-out", value_parser = clap::value_parser!(u32).range(1..=30))]
    pub hold_out: Option<u32>,

    /// Number of repetitions
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub reps: Option<u32>,
}

impl SessionArgs {
    /// Apply the overrides on top of `base`.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::Config` naming the first out-of-range flag.
    pub fn apply(&self, base: SessionConfig) -> Result<SessionConfig, BreathError> {
        let mut config = base;
        let durations = [
            ("--inhale", PhaseKind::Inhale, self.inhale),
            ("--hold-in", PhaseKind::HoldAfterInhale, self.hold_in),
            ("--exhale", PhaseKind::Exhale, self.exhale),
            ("--hold-out", PhaseKind::HoldAfterExhale, self.hold_out),
        ];
        for (flag, kind, value) in durations {
            if let Some(seconds) = value {
                if !config.set_duration(kind, seconds) {
                    return Err(BreathError::Config(format!(
                        "{flag} must be between {} and {} seconds, got {seconds}",
                        DURATION_RANGE.start(),
                        DURATION_RANGE.end()
                    )));
                }
            }
        }
        if let Some(reps) = self.reps {
            if !config.set_reps(reps) {
                return Err(BreathError::Config(format!(
                    "--reps must be between {} and {}, got {reps}",
                    REPS_RANGE.start(),
                    REPS_RANGE.end()
                )));
            }
        }
        Ok(config)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Deliver ticks without waiting (simulation)
    #[arg(long)]
    pub fast: bool,

    /// Do not ring the terminal bell
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_command_defaults_to_tui() {
        let cli = Cli::try_parse_from(["lastbreath"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(cli.output, OutputFormat::Pretty));
    }

    #[test]
    fn test_cli_output_json() {
        let cli = Cli::try_parse_from(["lastbreath", "-o", "json", "plan"]).unwrap();
        assert!(matches!(cli.output, OutputFormat::Json));
        assert!(matches!(cli.command, Some(Commands::Plan(_))));
    }

    #[test]
    fn test_cli_run_overrides() {
        let cli = Cli::try_parse_from([
            "lastbreath", "run", "--inhale", "4", "--hold-in", "7", "--exhale", "8", "--hold-out",
            "1", "--reps", "3", "--fast", "--quiet",
        ])
        .unwrap();
        let Some(Commands::Run(args)) = cli.command else {
            panic!("Expected Run command");
        };
        assert!(args.fast);
        assert!(args.quiet);

        let config = args.session.apply(SessionConfig::default()).unwrap();
        assert_eq!(config, SessionConfig::new(4, 7, 8, 1, 3).unwrap());
    }

    #[test]
    fn test_cli_rejects_out_of_range() {
        assert!(Cli::try_parse_from(["lastbreath", "run", "--inhale", "0"]).is_err());
        assert!(Cli::try_parse_from(["lastbreath", "run", "--exhale", "31"]).is_err());
        assert!(Cli::try_parse_from(["lastbreath", "plan", "--reps", "11"]).is_err());
    }

    #[test]
    fn test_partial_overrides_keep_base() {
        let args = SessionArgs {
            exhale: Some(9),
            ..SessionArgs::default()
        };
        let base = SessionConfig::uniform(3, 2).unwrap();
        let config = args.apply(base).unwrap();
        assert_eq!(config.duration(PhaseKind::Exhale), 9);
        assert_eq!(config.duration(PhaseKind::Inhale), 3);
        assert_eq!(config.reps(), 2);
    }

    #[test]
    fn test_out_of_range_override_names_flag() {
        let base = SessionConfig::default();

        let args = SessionArgs {
            hold_out: Some(0),
            ..SessionArgs::default()
        };
        let err = args.apply(base).unwrap_err();
        assert!(matches!(err, BreathError::Config(_)));
        assert!(err.to_string().contains("--hold-out"));

        let args = SessionArgs {
            reps: Some(11),
            ..SessionArgs::default()
        };
        assert!(args.apply(base).unwrap_err().to_string().contains("--reps"));
    }

    #[test]
    fn test_cli_config_subcommands() {
        let cli = Cli::try_parse_from(["lastbreath", "config", "path"]).unwrap();
        let Some(Commands::Config(args)) = cli.command else {
            panic!("Expected Config command");
        };
        assert!(matches!(args.command, ConfigCommands::Path));
    }

    #[test]
    fn test_output_format_default() {
        assert!(matches!(OutputFormat::default(), OutputFormat::Pretty));
    }
}
