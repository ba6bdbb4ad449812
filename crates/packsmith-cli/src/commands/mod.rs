//! CLI commands

pub mod analyze;
