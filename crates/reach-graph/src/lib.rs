//! # reach-graph
//!
//! Pure graph data structures for file-level dependency graphs.
//!
//! This crate holds the resolved dependency graph and the structural
//! algorithms that run over it, without any I/O or resolution logic. Import
//! resolution lives in `reach-analysis`; this crate only ever sees edges
//! between files that are known to exist.
//!
//! ## Overview
//!
//! - **[`DependencyGraph`]**: file path to ordered, de-duplicated dependency list
//! - **Reachability**: worklist traversal from a set of [`EntryPoint`]s
//! - **Cycle detection**: iterative depth-first search reporting every [`Cycle`]
//! - **Coupling**: out-degree threshold check producing [`CouplingFinding`]s
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    DependencyGraph                          │
//! │        (IndexMap<path, IndexSet<path>>, append-only)        │
//! └────────────────────┬────────────────────────────────────────┘
//!                      │
//!          ┌───────────┼───────────┐
//!          │           │           │
//!          ▼           ▼           ▼
//!   ┌────────────┐ ┌─────────┐ ┌──────────┐
//!   │Reachability│ │ Cycles  │ │ Coupling │
//!   │ (worklist) │ │  (DFS)  │ │(outdeg.) │
//!   └────────────┘ └─────────┘ └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use reach_graph::{DependencyGraph, EntryPoint, EntrySource};
//!
//! # fn main() -> reach_graph::Result<()> {
//! let mut graph = DependencyGraph::with_files(["src/index.ts", "src/util.ts", "src/old.ts"]);
//! graph.add_dependency("src/index.ts", "src/util.ts")?;
//!
//! let entries = [EntryPoint::new("src/index.ts", EntrySource::ManifestMain)];
//! let reachable = graph.reachable_from(&entries);
//!
//! assert_eq!(graph.dead_files(&reachable), vec!["src/old.ts".to_string()]);
//! assert!(graph.find_cycles().is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Determinism
//!
//! Files and edges keep insertion order, so every traversal result (dead-file
//! order, cycle order and rotation) is a pure function of the order in which the
//! caller registered files and edges.

pub mod coupling;
pub mod cycles;
pub mod entry;
pub mod graph;
pub mod reachability;
pub mod statistics;

pub use coupling::{CouplingFinding, DEFAULT_COUPLING_THRESHOLD};
pub use cycles::Cycle;
pub use entry::{EntryPoint, EntrySource};
pub use graph::DependencyGraph;
pub use reachability::ReachableSet;
pub use statistics::GraphStatistics;

/// Error types for graph construction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An edge referenced a file that was never registered in the graph.
    #[error("Unknown file: {0}")]
    UnknownFile(String),

    /// A cycle chain that is not closed or has fewer than two elements.
    #[error("Invalid cycle: {0}")]
    InvalidCycle(String),
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
