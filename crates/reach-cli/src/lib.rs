//! Command-line interface for the reach analyzer.
//!
//! - [`cli`] - argument definitions
//! - [`commands`] - subcommand implementations
//! - [`loader`] - walks a project directory into a file snapshot
//! - [`conversions`] - maps loaded configuration onto analyzer types
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - terminal rendering of analysis results
//! - [`error`] - CLI errors and their diagnostics

pub mod cli;
pub mod commands;
pub mod conversions;
pub mod error;
pub mod loader;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
