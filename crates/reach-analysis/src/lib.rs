//! # reach-analysis
//!
//! Cross-file static reachability analysis for JavaScript and TypeScript
//! source trees.
//!
//! Given an in-memory snapshot of files, this crate resolves every import to
//! a concrete file, builds a dependency graph and reports files unreachable
//! from the project's entry points, circular dependency chains and files with
//! excessive outgoing coupling.
//!
//! ## Pipeline
//!
//! ```text
//!   FileRecords ─► Snapshot ─► build_graph ─► DependencyGraph
//!                                  │                │
//!                          ImportOrchestrator       ├─► reachable / dead files
//!                     (Relative, Alias, Framework,  ├─► cycles
//!                      Absolute + validate_path)    └─► coupling findings
//!                                                         ▲
//!   package.json ─► manifest entries ─┐                   │
//!   framework analyzer ─► routes, dynamic usage ──────────┘
//! ```
//!
//! Resolution failures are data: an import that matches no file becomes a
//! [`Resolution`] with `exists == false`, a failure reason and the trace of
//! every candidate tried. The only errors are wiring mistakes
//! ([`AnalyzeError::ContextNotInitialized`]) and malformed inputs.
//!
//! ## Quick Start
//!
//! ```rust
//! use reach_analysis::{Analyzer, FileRecord};
//!
//! # fn main() -> reach_analysis::Result<()> {
//! let result = Analyzer::new()
//!     .files([
//!         FileRecord::new("src/index.ts", "import { util } from './util';"),
//!         FileRecord::new("src/util.ts", "import './index';"),
//!     ])
//!     .entry("src/index.ts")
//!     .analyze()?;
//!
//! assert!(result.dead_files.is_empty());
//! assert_eq!(result.cycles[0].path(), ["src/index.ts", "src/util.ts", "src/index.ts"]);
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod builder;
pub mod config;
pub mod frameworks;
pub mod manifest;
pub mod resolver;
pub mod result;
pub mod snapshot;

pub use analyzer::{Analyzer, Configured, Unconfigured};
pub use builder::{GraphBuild, ImportCounts, build_graph, extract_imports};
pub use config::{AnalyzerConfig, FrameworkConfig, FrameworkKind};
pub use frameworks::{FrameworkAnalyzer, detect_framework};
pub use manifest::{FrameworkHints, ManifestInfo, extract_manifest, resolve_entry_points};
pub use resolver::{
    ImportOrchestrator, ImportResolution, ImportResolver, PathCheck, Resolution,
    ResolutionContext, Strategy, validate_path,
};
pub use result::{AnalysisReport, AnalysisResult};
pub use snapshot::{FileRecord, FileSet, Snapshot, normalize_path};

pub use reach_graph::{
    CouplingFinding, Cycle, DependencyGraph, EntryPoint, EntrySource, GraphStatistics,
    ReachableSet,
};

/// Errors from wiring or input defects. Unresolvable imports are not errors.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    /// The orchestrator was asked to resolve before a context was installed.
    #[error("import orchestrator used before a resolution context was initialized")]
    ContextNotInitialized,

    #[error(transparent)]
    Graph(#[from] reach_graph::Error),

    /// The manifest is not a JSON object.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;

#[cfg(test)]
mod tests;
