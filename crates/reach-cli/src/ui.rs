//! Terminal rendering of analysis results.

use std::fmt::Write as _;

use console::style;
use reach_analysis::AnalysisResult;

/// Enable or disable styling for everything rendered afterwards.
pub fn init_colors(enabled: bool) {
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}

/// Human-readable report of one analysis.
///
/// With `trace`, unresolved imports are listed with every candidate tried.
pub fn render_summary(result: &AnalysisResult, trace: bool) -> String {
    let mut out = String::new();
    let stats = &result.stats;

    let framework = result
        .framework
        .as_ref()
        .map(|f| format!(" ({})", f.name))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "{} Analyzed {} files{}",
        style("✔").green().bold(),
        style(stats.files).cyan(),
        framework
    );
    let _ = writeln!(
        out,
        "  {} entry points, {} reachable, {} imports ({} resolved, {} external, {} unresolved)",
        stats.entry_points,
        stats.reachable,
        stats.total_imports,
        stats.resolved_imports,
        stats.external_imports,
        stats.unresolved_imports
    );

    section(&mut out, "Dead files", result.dead_files.len());
    for path in &result.dead_files {
        let _ = writeln!(out, "  {}", style(path).red());
    }

    section(&mut out, "Cycles", result.cycles.len());
    for cycle in &result.cycles {
        let _ = writeln!(out, "  {}", style(cycle).yellow());
    }

    section(&mut out, "Coupling", result.coupling.len());
    for finding in &result.coupling {
        let _ = writeln!(
            out,
            "  {} {}",
            style(&finding.path).yellow(),
            style(format!("({} dependencies)", finding.out_degree)).dim()
        );
    }

    if trace {
        let unresolved: Vec<_> = result.unresolved_imports().collect();
        section(&mut out, "Unresolved imports", unresolved.len());
        for import in unresolved {
            let reason = import.resolution.failure_reason.as_deref().unwrap_or("not found");
            let _ = writeln!(
                out,
                "  {} {} {}",
                style(&import.from).bold(),
                style(format!("'{}'", import.specifier)).magenta(),
                style(reason).dim()
            );
            if !import.resolution.trace.is_empty() {
                let _ = writeln!(out, "    tried: {}", import.resolution.trace.join(", "));
            }
        }
    }

    for warning in &result.warnings {
        let _ = writeln!(out, "{} {}", style("⚠").yellow().bold(), warning);
    }

    out
}

fn section(out: &mut String, title: &str, count: usize) {
    let count = if count == 0 {
        style(count.to_string()).green()
    } else {
        style(count.to_string()).yellow()
    };
    let _ = writeln!(out, "\n{} {}", style(title).bold(), count);
}
