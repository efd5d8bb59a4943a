//! Feature implementations for lastbreath.

pub mod breathing;
