//! lastbreath - a guided box-breathing timer for the terminal
//!
//! The breathing state machine lives in [`features::breathing`]; the CLI,
//! headless runner, and interactive screen are thin layers over it.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::BreathError;
pub use features::breathing::{SessionConfig, SessionController};
