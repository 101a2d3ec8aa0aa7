//! Core DependencyGraph structure.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// File-level dependency graph.
///
/// Maps every analyzed file path to the ordered set of internal files it
/// depends on. Every edge target is itself a registered file: external and
/// unresolved imports never enter the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    edges: IndexMap<String, IndexSet<String>>,
}

impl DependencyGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with the given files registered and no edges.
    pub fn with_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut graph = Self::new();
        for file in files {
            graph.add_file(file);
        }
        graph
    }

    /// Register a file. Registering an existing file is a no-op.
    pub fn add_file(&mut self, path: impl Into<String>) {
        self.edges.entry(path.into()).or_default();
    }

    /// Add an edge `from -> to`.
    ///
    /// Both ends must already be registered. Returns `Ok(false)` if the edge
    /// was already present.
    pub fn add_dependency(&mut self, from: &str, to: &str) -> Result<bool> {
        if !self.edges.contains_key(to) {
            return Err(Error::UnknownFile(to.to_string()));
        }
        let deps = self
            .edges
            .get_mut(from)
            .ok_or_else(|| Error::UnknownFile(from.to_string()))?;
        Ok(deps.insert(to.to_string()))
    }

    /// Whether a file is registered.
    pub fn contains(&self, path: &str) -> bool {
        self.edges.contains_key(path)
    }

    /// All registered files in insertion order.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    /// Dependencies of a file (forward edges), in insertion order.
    pub fn dependencies(&self, path: &str) -> impl Iterator<Item = &str> {
        self.edges
            .get(path)
            .into_iter()
            .flat_map(|deps| deps.iter().map(String::as_str))
    }

    /// Files that depend on `path` (reverse edges).
    pub fn dependents(&self, path: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|(_, deps)| deps.contains(path))
            .map(|(from, _)| from.as_str())
            .collect()
    }

    /// Count of distinct dependencies of a file.
    pub fn out_degree(&self, path: &str) -> usize {
        self.edges.get(path).map_or(0, IndexSet::len)
    }

    /// Returns true if a direct edge exists between two files.
    pub fn has_dependency(&self, from: &str, to: &str) -> bool {
        self.edges.get(from).is_some_and(|deps| deps.contains(to))
    }

    /// Number of registered files.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check whether graph is empty.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Total number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(IndexSet::len).sum()
    }

    pub(crate) fn index_of(&self, path: &str) -> Option<usize> {
        self.edges.get_index_of(path)
    }

    pub(crate) fn dependency_indices(&self, index: usize) -> Vec<usize> {
        self.edges
            .get_index(index)
            .map(|(_, deps)| {
                deps.iter()
                    .filter_map(|dep| self.edges.get_index_of(dep.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn path_at(&self, index: usize) -> &str {
        self.edges
            .get_index(index)
            .map(|(path, _)| path.as_str())
            .unwrap_or_default()
    }
}
