//! Subcommand implementations.
//!
//! - [`analyze`] - dead files, cycles and coupling for one project

pub mod analyze;

pub use analyze::execute as analyze_execute;
