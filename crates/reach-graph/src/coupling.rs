//! Outgoing coupling (out-degree) analysis.

use serde::{Deserialize, Serialize};

use crate::graph::DependencyGraph;

/// Default maximum number of distinct internal dependencies before a file is
/// reported as excessively coupled.
pub const DEFAULT_COUPLING_THRESHOLD: usize = 10;

/// A file whose out-degree strictly exceeds the configured threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouplingFinding {
    pub path: String,
    pub out_degree: usize,
}

impl DependencyGraph {
    /// Report every file with more than `threshold` distinct dependencies.
    ///
    /// Findings are ordered by descending out-degree, ties broken by path.
    /// A file at exactly `threshold` is not reported.
    pub fn coupling_findings(&self, threshold: usize) -> Vec<CouplingFinding> {
        let mut findings: Vec<CouplingFinding> = self
            .files()
            .filter_map(|path| {
                let out_degree = self.out_degree(path);
                (out_degree > threshold).then(|| CouplingFinding {
                    path: path.to_string(),
                    out_degree,
                })
            })
            .collect();

        findings.sort_by(|a, b| {
            b.out_degree
                .cmp(&a.out_degree)
                .then_with(|| a.path.cmp(&b.path))
        });
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fan_out(count: usize) -> DependencyGraph {
        let mut graph = DependencyGraph::with_files(["hub.ts"]);
        for i in 0..count {
            let leaf = format!("leaf{i}.ts");
            graph.add_file(leaf.clone());
            graph.add_dependency("hub.ts", &leaf).unwrap();
        }
        graph
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let graph = fan_out(DEFAULT_COUPLING_THRESHOLD);
        assert!(graph.coupling_findings(DEFAULT_COUPLING_THRESHOLD).is_empty());
    }

    #[test]
    fn test_above_threshold_is_reported() {
        let graph = fan_out(DEFAULT_COUPLING_THRESHOLD + 1);

        let findings = graph.coupling_findings(DEFAULT_COUPLING_THRESHOLD);

        assert_eq!(
            findings,
            vec![CouplingFinding {
                path: "hub.ts".to_string(),
                out_degree: 11,
            }]
        );
    }

    #[test]
    fn test_findings_sorted_by_degree() {
        let mut graph = fan_out(3);
        graph.add_file("mid.ts");
        graph.add_dependency("mid.ts", "leaf0.ts").unwrap();
        graph.add_dependency("mid.ts", "leaf1.ts").unwrap();

        let findings = graph.coupling_findings(1);

        let paths: Vec<&str> = findings.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["hub.ts", "mid.ts"]);
    }

    #[test]
    fn test_zero_threshold_reports_any_dependency() {
        let mut graph = DependencyGraph::with_files(["a.ts", "b.ts"]);
        graph.add_dependency("a.ts", "b.ts").unwrap();

        let findings = graph.coupling_findings(0);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].path, "a.ts");
    }
}
