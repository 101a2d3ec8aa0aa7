//! Command-line interface definition.
//!
//! - `reach analyze [ROOT]` - report dead files, import cycles and coupling

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// reach - find files nothing imports
#[derive(Parser, Debug)]
#[command(
    name = "reach",
    version,
    about = "Static reachability analysis for JavaScript/TypeScript projects",
    long_about = "reach resolves every import in a JavaScript/TypeScript source tree, builds the\n\
                  dependency graph and reports files unreachable from the project's entry points,\n\
                  circular import chains and files with too many dependencies."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows per-import resolution decisions and pass summaries.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn globals(&self) -> GlobalFlags {
        GlobalFlags {
            verbose: self.verbose,
            quiet: self.quiet,
            no_color: self.no_color,
        }
    }
}

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalFlags {
    pub verbose: bool,
    pub quiet: bool,
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a project for dead files, cycles and coupling
    ///
    /// Entry points come from package.json, framework routing conventions
    /// and any --entry paths. Exits with status 0 whatever the findings.
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Project root
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Config file to use instead of ROOT/reach.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report files with more distinct dependencies than N
    #[arg(short, long, value_name = "N", value_parser = parse_threshold)]
    pub threshold: Option<usize>,

    /// Framework to assume instead of detecting one
    ///
    /// next, nuxt, sveltekit, remix, astro, gatsby or vite.
    #[arg(short, long, value_name = "NAME")]
    pub framework: Option<String>,

    /// Extra entry point, relative to ROOT (repeatable)
    #[arg(short, long = "entry", value_name = "PATH")]
    pub entries: Vec<String>,

    /// Write the full report as JSON to FILE
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// List unresolved imports with the candidates each resolver tried
    #[arg(long)]
    pub trace: bool,
}

/// A coupling threshold must be a positive integer.
pub fn parse_threshold(s: &str) -> Result<usize, String> {
    let value: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("threshold must be a positive integer: '{s}'"))?;
    if value == 0 {
        return Err("threshold must be at least 1".to_string());
    }
    Ok(value)
}
