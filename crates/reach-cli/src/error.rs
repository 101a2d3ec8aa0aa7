//! Error handling for the reach CLI.
//!
//! Subcommands return `anyhow::Result` so failures can carry context.
//! [`CliError`] covers the failures with a known remedy, and [`to_miette`]
//! turns either kind into a diagnostic with a hint.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] reach_config::ConfigError),

    #[error("Analysis error: {0}")]
    Analyze(#[from] reach_analysis::AnalyzeError),

    /// The project root does not exist or is not a directory.
    #[error("Project root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Invalid package.json at {}: {source}", path.display())]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to walk project: {0}")]
    Walk(#[from] ignore::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// What the user can do about it, if anything obvious.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Config(reach_config::ConfigError::NotFound) => {
                Some("Check the --config path, or drop it to use ROOT/reach.toml")
            }
            Self::Config(_) => Some("Check reach.toml, the \"reach\" field of package.json and REACH_* variables"),
            Self::RootNotFound(_) => Some("Pass the directory that contains package.json"),
            Self::InvalidManifest { .. } => Some("Fix the package.json syntax; entry points are read from it"),
            _ => None,
        }
    }
}

/// Render an error as a miette report, with a hint when one is known.
///
/// A [`CliError`] message already embeds its source, so only other errors
/// print their whole context chain.
pub fn to_miette(err: &anyhow::Error) -> miette::Report {
    match err.downcast_ref::<CliError>() {
        Some(cli) => match cli.hint() {
            Some(hint) => miette::miette!(help = hint, "{}", err),
            None => miette::miette!("{}", err),
        },
        None => miette::miette!("{:#}", err),
    }
}
