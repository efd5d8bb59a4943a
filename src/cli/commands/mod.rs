//! Command implementations for lastbreath.
//!
//! This module contains the implementation of all CLI commands.

mod config;
mod plan;
mod run;

pub use config::config;
pub use plan::plan;
pub use run::{drive, run};
