//! Circular dependency detection.
//!
//! Uses an iterative depth-first search with an explicit `(node, next child)`
//! stack, so arbitrarily long import chains cannot overflow the call stack.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::DependencyGraph;
use crate::{Error, Result};

/// A closed chain of imports.
///
/// The first and last elements are always the same file, and the chain has
/// at least two elements: a file importing itself is `[x, x]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Cycle {
    path: Vec<String>,
}

impl TryFrom<Vec<String>> for Cycle {
    type Error = Error;

    /// Accepts a full chain: two or more files, first equal to last.
    fn try_from(path: Vec<String>) -> Result<Self> {
        match (path.first(), path.last()) {
            (Some(first), Some(last)) if path.len() >= 2 && first == last => Ok(Self { path }),
            _ => Err(Error::InvalidCycle(format!("{path:?}"))),
        }
    }
}

impl From<Cycle> for Vec<String> {
    fn from(cycle: Cycle) -> Self {
        cycle.path
    }
}

impl Cycle {
    /// Build a cycle from the files on it, without the closing repetition.
    ///
    /// `["a", "b"]` becomes `a -> b -> a`. Returns `None` for an empty slice.
    pub fn closing(members: &[&str]) -> Option<Self> {
        let first = members.first()?;
        let mut path: Vec<String> = members.iter().map(|m| m.to_string()).collect();
        path.push(first.to_string());
        Some(Self { path })
    }

    /// The full chain including the repeated first element.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Files on the cycle without the closing repetition.
    pub fn members(&self) -> &[String] {
        &self.path[..self.path.len() - 1]
    }

    /// Number of distinct files on the cycle.
    pub fn len(&self) -> usize {
        self.path.len() - 1
    }

    /// Cycles always contain at least one file.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether this is a file importing itself.
    pub fn is_self_loop(&self) -> bool {
        self.len() == 1
    }

    /// Whether a file participates in this cycle.
    pub fn contains(&self, path: &str) -> bool {
        self.members().iter().any(|member| member == path)
    }

    /// Format the chain as a human-readable string.
    ///
    /// Example: "a.ts -> b.ts -> a.ts"
    pub fn format_chain(&self) -> String {
        self.path.join(" -> ")
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_chain())
    }
}

impl DependencyGraph {
    /// Find circular dependency chains.
    ///
    /// The search restarts from every file not yet fully explored, so disjoint
    /// cycles are all reported. Each file is fully explored at most once; a
    /// cycle is reported every time an edge closes back onto the active path.
    pub fn find_cycles(&self) -> Vec<Cycle> {
        let count = self.len();
        let mut finished = vec![false; count];
        let mut on_path = vec![false; count];
        let mut cycles = Vec::new();

        for root in 0..count {
            if finished[root] {
                continue;
            }

            // (node, children, index of next child to visit)
            let mut stack: Vec<(usize, Vec<usize>, usize)> =
                vec![(root, self.dependency_indices(root), 0)];
            let mut path: Vec<usize> = vec![root];
            on_path[root] = true;

            while let Some(frame) = stack.last_mut() {
                let (node, children, next) = (frame.0, &frame.1, &mut frame.2);

                if *next >= children.len() {
                    stack.pop();
                    path.pop();
                    on_path[node] = false;
                    finished[node] = true;
                    continue;
                }

                let child = children[*next];
                *next += 1;

                if on_path[child] {
                    let start = path.iter().position(|&p| p == child).unwrap_or(0);
                    let members: Vec<&str> =
                        path[start..].iter().map(|&i| self.path_at(i)).collect();
                    if let Some(cycle) = Cycle::closing(&members) {
                        cycles.push(cycle);
                    }
                } else if !finished[child] {
                    on_path[child] = true;
                    path.push(child);
                    stack.push((child, self.dependency_indices(child), 0));
                }
            }
        }

        cycles
    }

    /// Returns true if any file participates in a circular dependency.
    pub fn has_cycles(&self) -> bool {
        !self.find_cycles().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_file_cycle() {
        let mut graph = DependencyGraph::with_files(["index.ts", "util.ts"]);
        graph.add_dependency("index.ts", "util.ts").unwrap();
        graph.add_dependency("util.ts", "index.ts").unwrap();

        let cycles = graph.find_cycles();

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].path(), ["index.ts", "util.ts", "index.ts"]);
        assert_eq!(cycles[0].format_chain(), "index.ts -> util.ts -> index.ts");
    }

    #[test]
    fn test_self_loop() {
        let mut graph = DependencyGraph::with_files(["x.ts"]);
        graph.add_dependency("x.ts", "x.ts").unwrap();

        let cycles = graph.find_cycles();

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].path(), ["x.ts", "x.ts"]);
        assert!(cycles[0].is_self_loop());
    }

    #[test]
    fn test_acyclic_graph_has_no_cycles() {
        let mut graph = DependencyGraph::with_files(["a.ts", "b.ts", "c.ts"]);
        graph.add_dependency("a.ts", "b.ts").unwrap();
        graph.add_dependency("a.ts", "c.ts").unwrap();
        graph.add_dependency("b.ts", "c.ts").unwrap();

        assert!(graph.find_cycles().is_empty());
        assert!(!graph.has_cycles());
    }

    #[test]
    fn test_disjoint_cycles_are_all_found() {
        let mut graph = DependencyGraph::with_files(["a.ts", "b.ts", "c.ts", "d.ts"]);
        graph.add_dependency("a.ts", "b.ts").unwrap();
        graph.add_dependency("b.ts", "a.ts").unwrap();
        graph.add_dependency("c.ts", "d.ts").unwrap();
        graph.add_dependency("d.ts", "c.ts").unwrap();

        let cycles = graph.find_cycles();

        assert_eq!(cycles.len(), 2);
        assert!(cycles.iter().any(|c| c.contains("a.ts") && c.contains("b.ts")));
        assert!(cycles.iter().any(|c| c.contains("c.ts") && c.contains("d.ts")));
    }

    #[test]
    fn test_cycle_reported_from_first_occurrence() {
        // entry -> a -> b -> c -> a
        let mut graph = DependencyGraph::with_files(["entry.ts", "a.ts", "b.ts", "c.ts"]);
        graph.add_dependency("entry.ts", "a.ts").unwrap();
        graph.add_dependency("a.ts", "b.ts").unwrap();
        graph.add_dependency("b.ts", "c.ts").unwrap();
        graph.add_dependency("c.ts", "a.ts").unwrap();

        let cycles = graph.find_cycles();

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].path(), ["a.ts", "b.ts", "c.ts", "a.ts"]);
        assert!(!cycles[0].contains("entry.ts"));
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let files: Vec<String> = (0..50_000).map(|i| format!("m{i}.ts")).collect();
        let mut graph = DependencyGraph::with_files(files.iter().cloned());
        for pair in files.windows(2) {
            graph.add_dependency(&pair[0], &pair[1]).unwrap();
        }
        graph.add_dependency(&files[files.len() - 1], &files[0]).unwrap();

        let cycles = graph.find_cycles();

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 50_000);
    }

    #[test]
    fn test_closing_rejects_empty() {
        assert!(Cycle::closing(&[]).is_none());
    }

    #[test]
    fn test_deserialize_checks_chain_shape() {
        let cycle: Cycle = serde_json::from_str(r#"["a.ts", "b.ts", "a.ts"]"#).unwrap();
        assert_eq!(cycle.members(), ["a.ts", "b.ts"]);
        assert_eq!(serde_json::to_string(&cycle).unwrap(), r#"["a.ts","b.ts","a.ts"]"#);

        assert!(serde_json::from_str::<Cycle>("[]").is_err());
        assert!(serde_json::from_str::<Cycle>(r#"["a.ts"]"#).is_err());
        assert!(serde_json::from_str::<Cycle>(r#"["a.ts", "b.ts"]"#).is_err());
    }
}
