use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use reach_analysis::{AnalysisResult, Analyzer};
use reach_config::ConfigDiscovery;

use crate::cli::{AnalyzeArgs, GlobalFlags};
use crate::conversions::{analyzer_config, overrides};
use crate::error::CliError;
use crate::loader::ProjectLoader;
use crate::logger::{self, LogOptions};
use crate::ui;

/// Run `reach analyze`. Findings never make it fail.
pub fn execute(args: AnalyzeArgs, globals: GlobalFlags) -> Result<()> {
    if !args.root.is_dir() {
        return Err(CliError::RootNotFound(args.root.clone()).into());
    }

    let mut discovery = ConfigDiscovery::new(&args.root);
    if let Some(path) = &args.config {
        discovery = discovery.with_config_file(path);
    }
    let config = discovery
        .load_with(&overrides(&args, globals))
        .map_err(CliError::from)?;

    let no_color = config.settings.no_color || !logger::should_use_colors(globals.no_color);
    logger::init_logger(&LogOptions {
        verbose: globals.verbose,
        quiet: globals.quiet,
        no_color,
        level: config.settings.log_level.clone(),
    });
    ui::init_colors(!no_color);

    let project = ProjectLoader::new(&args.root)
        .with_ignore(config.ignore.clone())
        .load()?;

    let mut analyzer = Analyzer::new()
        .config(analyzer_config(&config))
        .detect_framework(config.framework.is_none());
    if let Some(manifest) = project.manifest {
        analyzer = analyzer.manifest(manifest);
    }
    let result = analyzer
        .files(project.records)
        .analyze()
        .map_err(CliError::from)?;

    print!("{}", ui::render_summary(&result, args.trace));

    if let Some(path) = &args.json {
        write_report(path, &result)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        println!(
            "{} Wrote report to {}",
            style("✔").green().bold(),
            style(path.display()).bold()
        );
    }

    Ok(())
}

fn write_report(path: &Path, result: &AnalysisResult) -> Result<()> {
    let json = serde_json::to_string_pretty(&result.report())?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, json)?;
    Ok(())
}
