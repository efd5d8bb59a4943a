//! Command-line interface for lastbreath.

pub mod args;
pub mod commands;
