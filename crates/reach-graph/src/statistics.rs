use serde::{Deserialize, Serialize};

/// Summary counters for one analysis pass.
///
/// The import counters describe input quality: a low `resolved_ratio` means
/// many internal-looking imports could not be mapped to files, which makes the
/// dead-file list less trustworthy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub files: usize,
    pub edges: usize,
    pub entry_points: usize,
    pub reachable: usize,
    pub dead: usize,
    pub cycles: usize,
    pub coupling_findings: usize,
    pub total_imports: usize,
    pub resolved_imports: usize,
    pub external_imports: usize,
    pub unresolved_imports: usize,
    pub resolved_ratio: f64,
}

impl GraphStatistics {
    /// Fraction of non-external imports that resolved to a file.
    ///
    /// Returns 1.0 when there were no internal-looking imports at all.
    pub fn compute_resolved_ratio(resolved: usize, unresolved: usize) -> f64 {
        let internal = resolved + unresolved;
        if internal == 0 {
            1.0
        } else {
            resolved as f64 / internal as f64
        }
    }
}
