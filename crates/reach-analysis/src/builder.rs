//! Dependency graph construction from a file snapshot.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use reach_graph::DependencyGraph;

use crate::Result;
use crate::resolver::{ImportOrchestrator, ImportResolution, Strategy, extract_package_name};
use crate::snapshot::Snapshot;

/// `import x from './a'`, `export * from './b'`, multi-line named imports.
static FROM_CLAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(?:import|export)\b[^'";]*?\bfrom\s*['"]([^'"]+)['"]"#)
        .expect("from clause regex is valid")
});

/// `import './polyfills'`
static SIDE_EFFECT_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*import\s*['"]([^'"]+)['"]"#).expect("side-effect import regex is valid")
});

/// `require('./a')`, `import('./b')`
static CALL_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(?:require|import)\s*\(\s*['"]([^'"]+)['"]\s*\)"#)
        .expect("call import regex is valid")
});

/// Import specifiers found in source text, in order of first appearance.
pub fn extract_imports(content: &str) -> Vec<String> {
    let mut found: Vec<(usize, &str)> = [&*FROM_CLAUSE, &*SIDE_EFFECT_IMPORT, &*CALL_IMPORT]
        .into_iter()
        .flat_map(|regex| regex.captures_iter(content))
        .filter_map(|captures| captures.get(1))
        .map(|m| (m.start(), m.as_str()))
        .collect();
    found.sort_by_key(|(start, _)| *start);

    let mut imports: Vec<String> = Vec::with_capacity(found.len());
    for (_, specifier) in found {
        if !imports.iter().any(|s| s == specifier) {
            imports.push(specifier.to_string());
        }
    }
    imports
}

/// Import outcome counters of one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportCounts {
    pub total: usize,
    pub resolved: usize,
    pub external: usize,
    pub unresolved: usize,
}

/// Output of [`build_graph`].
#[derive(Debug, Clone, Default)]
pub struct GraphBuild {
    pub graph: DependencyGraph,
    /// Every import attempted, in file then import order.
    pub resolutions: Vec<ImportResolution>,
    /// External package name to the number of files importing it.
    pub external_packages: BTreeMap<String, usize>,
    pub counts: ImportCounts,
}

/// Resolve every import of every loaded file into graph edges.
///
/// All snapshot files become graph nodes. Files without content contribute
/// no edges. Only resolutions that exist and are not external become edges.
pub fn build_graph(snapshot: &Snapshot, orchestrator: &ImportOrchestrator) -> Result<GraphBuild> {
    let mut build = GraphBuild {
        graph: DependencyGraph::with_files(snapshot.paths()),
        ..GraphBuild::default()
    };

    for record in snapshot.records() {
        let Some(content) = record.content.as_deref() else {
            tracing::trace!(path = %record.path, "skipping unloaded file");
            continue;
        };

        let mut specifiers = match &record.raw_imports {
            Some(raw) => raw.clone(),
            None => extract_imports(content),
        };
        let mut seen = rustc_hash::FxHashSet::default();
        specifiers.retain(|s| seen.insert(s.clone()));

        let mut packages = rustc_hash::FxHashSet::default();
        for specifier in specifiers {
            let resolution = orchestrator.resolve(&specifier, &record.path)?;
            build.counts.total += 1;

            match resolution.resolved_path.as_deref() {
                Some(target) if resolution.is_edge() => {
                    build.counts.resolved += 1;
                    build.graph.add_dependency(&record.path, target)?;
                }
                _ if resolution.strategy == Strategy::External && resolution.trace.is_empty() => {
                    build.counts.external += 1;
                    let package = extract_package_name(&specifier);
                    if !package.is_empty() && packages.insert(package.to_string()) {
                        *build.external_packages.entry(package.to_string()).or_default() += 1;
                    }
                }
                _ => build.counts.unresolved += 1,
            }

            build.resolutions.push(ImportResolution {
                from: record.path.clone(),
                specifier,
                resolution,
            });
        }
    }

    tracing::debug!(
        files = build.graph.len(),
        edges = build.graph.edge_count(),
        imports = build.counts.total,
        unresolved = build.counts.unresolved,
        "dependency graph built"
    );
    Ok(build)
}
