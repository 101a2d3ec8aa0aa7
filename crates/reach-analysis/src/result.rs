use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use reach_graph::{
    CouplingFinding, Cycle, DependencyGraph, EntryPoint, GraphStatistics, ReachableSet,
};

use crate::config::FrameworkConfig;
use crate::manifest::FrameworkHints;
use crate::resolver::ImportResolution;

#[derive(Debug)]
pub struct AnalysisResult {
    pub graph: DependencyGraph,
    /// Manifest, framework and configured entry points, each naming a known file.
    pub entry_points: Vec<EntryPoint>,
    /// Files loaded only through dynamic imports. Treated as live.
    pub dynamic_usage: Vec<String>,
    pub reachable: ReachableSet,
    pub dead_files: Vec<String>,
    pub cycles: Vec<Cycle>,
    pub coupling: Vec<CouplingFinding>,
    pub resolutions: Vec<ImportResolution>,
    /// External package name to the number of files importing it.
    pub external_packages: BTreeMap<String, usize>,
    pub framework: Option<FrameworkConfig>,
    pub framework_hints: FrameworkHints,
    pub warnings: Vec<String>,
    pub stats: GraphStatistics,
}

impl AnalysisResult {
    pub fn is_dead(&self, path: &str) -> bool {
        self.graph.contains(path) && !self.reachable.contains(path)
    }

    /// Imports that looked internal but matched no file.
    pub fn unresolved_imports(&self) -> impl Iterator<Item = &ImportResolution> {
        self.resolutions
            .iter()
            .filter(|r| !r.resolution.exists && !r.resolution.trace.is_empty())
    }

    /// Resolution records of one importing file.
    pub fn resolutions_from<'a>(
        &'a self,
        path: &'a str,
    ) -> impl Iterator<Item = &'a ImportResolution> + 'a {
        self.resolutions.iter().filter(move |r| r.from == path)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Serializable view of the result.
    pub fn report(&self) -> AnalysisReport<'_> {
        AnalysisReport {
            framework: self.framework.as_ref().map(|f| f.name.as_str()),
            framework_hints: &self.framework_hints,
            stats: &self.stats,
            entry_points: &self.entry_points,
            dynamic_usage: &self.dynamic_usage,
            dead_files: &self.dead_files,
            cycles: &self.cycles,
            coupling: &self.coupling,
            external_packages: &self.external_packages,
            resolutions: &self.resolutions,
            graph: &self.graph,
            warnings: &self.warnings,
        }
    }
}

/// JSON shape of an [`AnalysisResult`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport<'a> {
    pub framework: Option<&'a str>,
    pub framework_hints: &'a FrameworkHints,
    pub stats: &'a GraphStatistics,
    pub entry_points: &'a [EntryPoint],
    pub dynamic_usage: &'a [String],
    pub dead_files: &'a [String],
    pub cycles: &'a [Cycle],
    pub coupling: &'a [CouplingFinding],
    pub external_packages: &'a BTreeMap<String, usize>,
    pub resolutions: &'a [ImportResolution],
    pub graph: &'a DependencyGraph,
    pub warnings: &'a [String],
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis Result")?;
        writeln!(f, "================")?;
        if let Some(framework) = &self.framework {
            writeln!(f, "Framework: {}", framework.name)?;
        }
        writeln!(f, "Files: {}", self.stats.files)?;
        writeln!(f, "Entry points: {}", self.entry_points.len())?;
        writeln!(f, "Reachable: {}", self.stats.reachable)?;
        writeln!(
            f,
            "Imports: {} ({} resolved, {} external, {} unresolved)",
            self.stats.total_imports,
            self.stats.resolved_imports,
            self.stats.external_imports,
            self.stats.unresolved_imports
        )?;

        writeln!(f, "Dead files: {}", self.dead_files.len())?;
        for path in &self.dead_files {
            writeln!(f, "  - {path}")?;
        }

        writeln!(f, "Cycles: {}", self.cycles.len())?;
        for cycle in &self.cycles {
            writeln!(f, "  - {cycle}")?;
        }

        writeln!(f, "Coupling findings: {}", self.coupling.len())?;
        for finding in &self.coupling {
            writeln!(f, "  - {} ({} dependencies)", finding.path, finding.out_degree)?;
        }

        for warning in &self.warnings {
            writeln!(f, "warning: {warning}")?;
        }
        Ok(())
    }
}
