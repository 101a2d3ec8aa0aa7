//! Reachability from entry points and dead-file detection.

use rustc_hash::FxHashSet as HashSet;
use serde::{Deserialize, Serialize};

use crate::entry::EntryPoint;
use crate::graph::DependencyGraph;

/// The set of files transitively importable from the entry points.
///
/// Every member is a registered file of the graph it was computed over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReachableSet {
    files: HashSet<String>,
}

impl ReachableSet {
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    /// Members sorted for stable output.
    pub fn sorted(&self) -> Vec<String> {
        let mut files: Vec<String> = self.files.iter().cloned().collect();
        files.sort();
        files
    }
}

impl DependencyGraph {
    /// Compute the reachable set from a collection of entry points.
    ///
    /// Entry points that name no registered file are skipped. Each file is
    /// pushed onto the worklist at most once, so the traversal is `O(V + E)`
    /// regardless of how many cycles the graph contains.
    pub fn reachable_from<'a, I>(&self, entries: I) -> ReachableSet
    where
        I: IntoIterator<Item = &'a EntryPoint>,
    {
        self.reachable_from_paths(entries.into_iter().map(|entry| entry.path.as_str()))
    }

    /// Same as [`reachable_from`](Self::reachable_from) for bare paths.
    pub fn reachable_from_paths<'a, I>(&self, roots: I) -> ReachableSet
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut visited: HashSet<String> = HashSet::default();
        let mut worklist: Vec<&str> = Vec::new();

        for root in roots {
            if self.contains(root) && visited.insert(root.to_string()) {
                worklist.push(root);
            }
        }

        while let Some(current) = worklist.pop() {
            for dep in self.dependencies(current) {
                if visited.insert(dep.to_string()) {
                    worklist.push(dep);
                }
            }
        }

        ReachableSet { files: visited }
    }

    /// Files registered in the graph but absent from `reachable`, in
    /// registration order.
    pub fn dead_files(&self, reachable: &ReachableSet) -> Vec<String> {
        self.files()
            .filter(|path| !reachable.contains(path))
            .map(str::to_string)
            .collect()
    }
}
