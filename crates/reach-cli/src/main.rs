//! reach - static reachability analysis for JavaScript/TypeScript projects.
//!
//! Parses arguments, dispatches the subcommand and renders failures as
//! miette diagnostics.

use clap::Parser;
use miette::Result;
use reach_cli::{cli, commands, error};

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let globals = args.globals();

    let result = match args.command {
        cli::Command::Analyze(analyze_args) => commands::analyze_execute(analyze_args, globals),
    };

    result.map_err(|err| error::to_miette(&err))
}
