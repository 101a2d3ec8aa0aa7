//! Whole-project analysis over an in-memory file snapshot.
//!
//! The Analyzer ties the pipeline together: manifest and framework entry
//! points, import resolution into a dependency graph, then reachability,
//! cycle and coupling passes over that graph. Everything runs synchronously
//! over immutable inputs, so independent analyses can run on separate
//! threads without coordination.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde_json::Value;

use reach_graph::{EntryPoint, EntrySource, GraphStatistics};

use crate::builder::build_graph;
use crate::config::{AnalyzerConfig, FrameworkConfig};
use crate::frameworks::{FrameworkAnalyzer, analyzer_for, detect_framework};
use crate::manifest::{extract_manifest, resolve_entry_points};
use crate::resolver::{ImportOrchestrator, ResolutionContext};
use crate::result::AnalysisResult;
use crate::snapshot::{FileRecord, Snapshot};
use crate::Result;

/// Below this resolved-import ratio the dead-file list is flagged as unreliable.
const LOW_RESOLUTION_RATIO: f64 = 0.5;

/// The ratio warning needs at least this many internal-looking imports.
const LOW_RESOLUTION_MIN_IMPORTS: usize = 10;

/// Typestate marker for an analyzer without files.
#[derive(Debug, Clone, Copy)]
pub struct Unconfigured;

/// Typestate marker for an analyzer with a file snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Configured;

/// Static reachability analyzer.
///
/// Uses the typestate pattern so `analyze()` is only available once a file
/// snapshot has been supplied.
///
/// # Example
///
/// ```rust
/// use reach_analysis::{Analyzer, FileRecord};
///
/// # fn main() -> reach_analysis::Result<()> {
/// let analysis = Analyzer::new()
///     .files([
///         FileRecord::new("src/index.ts", "import { a } from './util';"),
///         FileRecord::new("src/util.ts", "export const a = 1;"),
///         FileRecord::new("src/old.ts", ""),
///     ])
///     .manifest(serde_json::json!({ "main": "dist/index.js" }))
///     .analyze()?;
///
/// assert_eq!(analysis.dead_files, vec!["src/old.ts"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Analyzer<State = Unconfigured> {
    config: AnalyzerConfig,
    snapshot: Snapshot,
    manifest: Option<Value>,
    detect_framework: bool,
    _state: PhantomData<State>,
}

impl Analyzer<Unconfigured> {
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
            snapshot: Snapshot::default(),
            manifest: None,
            detect_framework: false,
            _state: PhantomData,
        }
    }
}

impl Default for Analyzer<Unconfigured> {
    fn default() -> Self {
        Self::new()
    }
}

impl<State> Analyzer<State> {
    /// Supply the files to analyze.
    ///
    /// Transitions to `Configured`. Calling it again replaces the snapshot.
    pub fn files(self, records: impl IntoIterator<Item = FileRecord>) -> Analyzer<Configured> {
        self.snapshot(Snapshot::new(records))
    }

    /// Supply an already-built snapshot.
    pub fn snapshot(self, snapshot: Snapshot) -> Analyzer<Configured> {
        Analyzer {
            config: self.config,
            snapshot,
            manifest: self.manifest,
            detect_framework: self.detect_framework,
            _state: PhantomData,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Decoded `package.json` contents.
    pub fn manifest(mut self, manifest: Value) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Set the active framework explicitly.
    pub fn framework(mut self, framework: FrameworkConfig) -> Self {
        self.config.framework = Some(framework);
        self
    }

    /// Detect the framework from indicator files and manifest hints when
    /// none was set explicitly (default: false).
    pub fn detect_framework(mut self, detect: bool) -> Self {
        self.detect_framework = detect;
        self
    }

    /// Report files with more distinct dependencies than `threshold` (default: 10).
    pub fn coupling_threshold(mut self, threshold: usize) -> Self {
        self.config.coupling_threshold = threshold;
        self
    }

    /// Add a path alias for import resolution.
    ///
    /// ```rust
    /// use reach_analysis::Analyzer;
    ///
    /// Analyzer::new().path_alias("@lib/*", "src/lib/*");
    /// // "@lib/date" now resolves against "src/lib/date"
    /// ```
    pub fn path_alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.config.path_aliases.insert(from.into(), to.into());
        self
    }

    /// Set multiple path aliases at once.
    pub fn path_aliases(mut self, aliases: BTreeMap<String, String>) -> Self {
        self.config.path_aliases = aliases;
        self
    }

    /// Declare an extra entry point.
    pub fn entry(mut self, path: impl Into<String>) -> Self {
        self.config.entries.push(path.into());
        self
    }

    pub fn entries(mut self, paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.entries.extend(paths.into_iter().map(Into::into));
        self
    }
}

impl Analyzer<Configured> {
    /// Run the full analysis.
    pub fn analyze(self) -> Result<AnalysisResult> {
        let Self {
            config,
            snapshot,
            manifest,
            detect_framework: detect,
            ..
        } = self;

        let manifest_info = extract_manifest(manifest.as_ref().unwrap_or(&Value::Null))?;
        let framework = match config.framework {
            Some(framework) => Some(framework),
            None if detect => detect_framework(&snapshot, &manifest_info.framework_hints),
            None => None,
        };
        let framework_analyzer = framework.as_ref().and_then(|f| analyzer_for(f.kind()));
        let snapshot = drop_unused_pages(snapshot, framework_analyzer.as_deref());

        let context = ResolutionContext::new(snapshot.files().clone())
            .with_framework(framework.clone())
            .with_aliases(&config.path_aliases);
        let mut orchestrator = ImportOrchestrator::new();
        orchestrator.initialize(context);
        let build = build_graph(&snapshot, &orchestrator)?;

        let mut warnings = Vec::new();
        let mut entry_points = resolve_entry_points(&manifest_info.entries, snapshot.files());
        if let Some(analyzer) = &framework_analyzer {
            merge_entries(&mut entry_points, analyzer.detect_entry_points(&snapshot));
        }
        for path in &config.entries {
            let declared = [EntryPoint::new(path.as_str(), EntrySource::Configured)];
            let resolved = resolve_entry_points(&declared, snapshot.files());
            if resolved.is_empty() {
                tracing::warn!(path = %path, "configured entry point matches no known file");
                warnings.push(format!("configured entry '{path}' matches no known file"));
            }
            merge_entries(&mut entry_points, resolved);
        }

        let dynamic_usage: Vec<String> = framework_analyzer
            .as_ref()
            .map(|analyzer| analyzer.detect_usage(&snapshot))
            .unwrap_or_default()
            .into_iter()
            .filter(|path| !entry_points.iter().any(|e| &e.path == path))
            .collect();

        let graph = build.graph;
        let reachable = graph.reachable_from_paths(
            entry_points
                .iter()
                .map(|e| e.path.as_str())
                .chain(dynamic_usage.iter().map(String::as_str)),
        );
        let dead_files = graph.dead_files(&reachable);
        let cycles = graph.find_cycles();
        let coupling = graph.coupling_findings(config.coupling_threshold);

        if entry_points.is_empty() && !snapshot.is_empty() {
            tracing::warn!("no entry points found; every file is reported dead");
            warnings.push("no entry points found; every file is reported dead".to_string());
        }

        let counts = build.counts;
        let resolved_ratio = GraphStatistics::compute_resolved_ratio(counts.resolved, counts.unresolved);
        let internal = counts.resolved + counts.unresolved;
        if internal >= LOW_RESOLUTION_MIN_IMPORTS && resolved_ratio < LOW_RESOLUTION_RATIO {
            tracing::warn!(
                resolved = counts.resolved,
                unresolved = counts.unresolved,
                ratio = resolved_ratio,
                "low import resolution ratio; dead-file results may be unreliable"
            );
            warnings.push(format!(
                "only {:.0}% of internal imports resolved ({} of {}); dead-file results may be unreliable",
                resolved_ratio * 100.0,
                counts.resolved,
                internal
            ));
        }

        let stats = GraphStatistics {
            files: graph.len(),
            edges: graph.edge_count(),
            entry_points: entry_points.len(),
            reachable: reachable.len(),
            dead: dead_files.len(),
            cycles: cycles.len(),
            coupling_findings: coupling.len(),
            total_imports: counts.total,
            resolved_imports: counts.resolved,
            external_imports: counts.external,
            unresolved_imports: counts.unresolved,
            resolved_ratio,
        };

        tracing::info!(
            files = stats.files,
            entry_points = stats.entry_points,
            dead = stats.dead,
            cycles = stats.cycles,
            coupling = stats.coupling_findings,
            "analysis complete"
        );

        Ok(AnalysisResult {
            graph,
            entry_points,
            dynamic_usage,
            reachable,
            dead_files,
            cycles,
            coupling,
            resolutions: build.resolutions,
            external_packages: build.external_packages,
            framework,
            framework_hints: manifest_info.framework_hints,
            warnings,
            stats,
        })
    }
}

/// Remove HTML pages the active framework does not treat as entries.
///
/// Modules never import HTML, so such a page would only ever show up dead.
fn drop_unused_pages(snapshot: Snapshot, analyzer: Option<&dyn FrameworkAnalyzer>) -> Snapshot {
    let unused = |path: &str| path.ends_with(".html") && analyzer.and_then(|a| a.classify(path)).is_none();
    if !snapshot.paths().any(|path| unused(path)) {
        return snapshot;
    }
    tracing::debug!("dropping HTML pages outside the active framework's conventions");
    Snapshot::new(
        snapshot
            .records()
            .iter()
            .filter(|record| !unused(&record.path))
            .cloned(),
    )
}

/// Append entries whose path is not already present.
fn merge_entries(entries: &mut Vec<EntryPoint>, more: Vec<EntryPoint>) {
    for entry in more {
        if !entries.iter().any(|e| e.path == entry.path) {
            entries.push(entry);
        }
    }
}
