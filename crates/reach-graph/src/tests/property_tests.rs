//! Property-based tests for the graph algorithms.
//!
//! Run with: cargo test --features proptest --package reach-graph property_tests

#![cfg(feature = "proptest")]

use crate::{DependencyGraph, EntryPoint, EntrySource};
use proptest::prelude::*;
use std::collections::HashSet;

/// Strategy for generating a graph over `n` files with random edges.
fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..=20).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n), 0..=60),
        )
    })
}

fn build(n: usize, edges: &[(usize, usize)]) -> DependencyGraph {
    let mut graph = DependencyGraph::with_files((0..n).map(|i| format!("f{i}.ts")));
    for (from, to) in edges {
        graph
            .add_dependency(&format!("f{from}.ts"), &format!("f{to}.ts"))
            .unwrap();
    }
    graph
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: EntryPoints ⊆ ReachableSet ⊆ AllFiles
    #[test]
    fn prop_reachable_bounds(
        (n, edges) in graph_strategy(),
        roots in prop::collection::vec(0usize..20, 0..=5)
    ) {
        let graph = build(n, &edges);
        let entries: Vec<EntryPoint> = roots
            .iter()
            .filter(|&&r| r < n)
            .map(|r| EntryPoint::new(format!("f{r}.ts"), EntrySource::Configured))
            .collect();

        let reachable = graph.reachable_from(&entries);

        for entry in &entries {
            prop_assert!(reachable.contains(&entry.path));
        }
        for file in reachable.iter() {
            prop_assert!(graph.contains(file));
        }
        prop_assert_eq!(reachable.len() + graph.dead_files(&reachable).len(), n);
    }

    /// Property: the reachable set is closed under dependency edges
    #[test]
    fn prop_reachable_is_closed((n, edges) in graph_strategy()) {
        let graph = build(n, &edges);
        let reachable = graph.reachable_from_paths(["f0.ts"]);

        for file in reachable.iter() {
            for dep in graph.dependencies(file) {
                prop_assert!(reachable.contains(dep));
            }
        }
    }

    /// Property: every reported cycle is closed and follows real edges
    #[test]
    fn prop_cycles_follow_edges((n, edges) in graph_strategy()) {
        let graph = build(n, &edges);

        for cycle in graph.find_cycles() {
            let path = cycle.path();
            prop_assert!(path.len() >= 2);
            prop_assert_eq!(path.first(), path.last());
            for pair in path.windows(2) {
                prop_assert!(graph.has_dependency(&pair[0], &pair[1]));
            }
            let distinct: HashSet<&String> = cycle.members().iter().collect();
            prop_assert_eq!(distinct.len(), cycle.members().len());
        }
    }

    /// Property: a self edge always yields a two-element cycle
    #[test]
    fn prop_self_edge_detected((n, edges) in graph_strategy(), pick in 0usize..20) {
        let target = pick % n;
        let mut graph = build(n, &edges);
        let name = format!("f{target}.ts");
        graph.add_dependency(&name, &name).unwrap();

        let cycles = graph.find_cycles();
        prop_assert!(cycles.iter().any(|c| c.path() == [name.clone(), name.clone()]));
    }

    /// Property: coupling findings match the out-degree definition exactly
    #[test]
    fn prop_coupling_matches_out_degree((n, edges) in graph_strategy(), threshold in 0usize..5) {
        let graph = build(n, &edges);
        let findings = graph.coupling_findings(threshold);

        let expected: HashSet<String> = graph
            .files()
            .filter(|f| graph.out_degree(f) > threshold)
            .map(str::to_string)
            .collect();
        let actual: HashSet<String> = findings.iter().map(|f| f.path.clone()).collect();
        prop_assert_eq!(actual, expected);
    }
}
