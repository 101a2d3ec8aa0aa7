//! Resolution tests through the orchestrator.

use std::collections::BTreeMap;

use super::test_helpers::*;
use crate::config::{FrameworkConfig, FrameworkKind};
use crate::resolver::{ImportOrchestrator, ResolutionContext, Strategy};

#[test]
fn test_resolve_relative_ts_file() {
    let orchestrator = orchestrator(&[("src/index.ts", ""), ("src/utils.ts", "")]);
    let result = orchestrator.resolve("./utils", "src/index.ts").unwrap();

    assert!(result.exists);
    assert_eq!(result.strategy, Strategy::Relative);
    assert_eq!(result.resolved_path.as_deref(), Some("src/utils.ts"));
}

#[test]
fn test_resolve_with_tsx_extension() {
    let orchestrator = orchestrator(&[("src/index.tsx", ""), ("src/Component.tsx", "")]);
    let result = orchestrator.resolve("./Component", "src/index.tsx").unwrap();
    assert_eq!(result.resolved_path.as_deref(), Some("src/Component.tsx"));
}

#[test]
fn test_resolve_parent_directory() {
    let orchestrator = orchestrator(&[("src/a/b/deep.ts", ""), ("src/shared.ts", "")]);
    let result = orchestrator.resolve("../../shared", "src/a/b/deep.ts").unwrap();
    assert_eq!(result.resolved_path.as_deref(), Some("src/shared.ts"));
}

#[test]
fn test_resolution_is_pure() {
    let orchestrator = orchestrator(&[("src/a.ts", ""), ("src/b/index.ts", "")]);

    for specifier in ["./b", "@/a", "~/missing", "react", "b", "../nowhere"] {
        let first = orchestrator.resolve(specifier, "src/a.ts").unwrap();
        let second = orchestrator.resolve(specifier, "src/a.ts").unwrap();
        assert_eq!(first, second, "resolution of {specifier} changed between calls");
    }
}

#[test]
fn test_relative_equivalence() {
    let orchestrator = orchestrator(&[("a/b.ts", ""), ("a/x.ts", ""), ("a/c/d.ts", "")]);

    let sibling = orchestrator.resolve("./b", "a/x.ts").unwrap();
    let from_child = orchestrator.resolve("../b", "a/c/d.ts").unwrap();

    assert!(sibling.exists);
    assert_eq!(sibling, from_child);
}

#[test]
fn test_bare_package_is_external() {
    let orchestrator = orchestrator(&[("src/index.ts", ""), ("react.ts", "")]);

    for specifier in ["react", "@tanstack/react-query", "node:fs", "path"] {
        let result = orchestrator.resolve(specifier, "src/index.ts").unwrap();
        assert_eq!(result.strategy, Strategy::External, "{specifier}");
        assert!(!result.exists);
        assert!(result.resolved_path.is_none());
    }
}

#[test]
fn test_at_alias_without_custom_map() {
    let orchestrator = orchestrator(&[("src/App.tsx", ""), ("src/components/Button.tsx", "")]);
    let result = orchestrator.resolve("@/components/Button", "src/App.tsx").unwrap();

    assert!(result.exists);
    assert_eq!(result.strategy, Strategy::Alias);
    assert_eq!(result.resolved_path.as_deref(), Some("src/components/Button.tsx"));
    assert_eq!(result.trace.first().map(String::as_str), Some("src/components/Button"));
}

#[test]
fn test_custom_scoped_alias_is_not_external() {
    let files = crate::snapshot::FileSet::from_paths(["src/ui/Card.tsx"]);
    let mut orchestrator = ImportOrchestrator::new();
    orchestrator.initialize(ResolutionContext::new(files).with_aliases(&BTreeMap::from([(
        "@ui/*".to_string(),
        "src/ui/*".to_string(),
    )])));

    let result = orchestrator.resolve("@ui/Card", "src/index.ts").unwrap();
    assert_eq!(result.strategy, Strategy::Alias);
    assert_eq!(result.resolved_path.as_deref(), Some("src/ui/Card.tsx"));
}

#[test]
fn test_framework_resolver_after_alias_fails() {
    // Remix keeps sources under app/, which the alias heuristic does not try.
    let orchestrator = orchestrator_with(
        &[("app/root.tsx", ""), ("app/components/Nav.tsx", "")],
        Some(FrameworkConfig::for_kind(FrameworkKind::Remix)),
    );
    let result = orchestrator.resolve("components/Nav", "app/root.tsx").unwrap();

    assert_eq!(result.strategy, Strategy::Framework);
    assert_eq!(result.resolved_path.as_deref(), Some("app/components/Nav.tsx"));
}

#[test]
fn test_higher_priority_success_wins_for_ambiguous_paths() {
    // Both src/components and app/components exist: alias (src/) answers first.
    let orchestrator = orchestrator_with(
        &[("src/components/Nav.tsx", ""), ("app/components/Nav.tsx", "")],
        Some(FrameworkConfig::for_kind(FrameworkKind::Remix)),
    );
    let result = orchestrator.resolve("components/Nav", "app/root.tsx").unwrap();
    assert_eq!(result.strategy, Strategy::Alias);
    assert_eq!(result.resolved_path.as_deref(), Some("src/components/Nav.tsx"));
}

#[test]
fn test_js_extension_in_esm_import() {
    let orchestrator = orchestrator(&[("src/index.ts", ""), ("src/util.ts", "")]);
    let result = orchestrator.resolve("./util.js", "src/index.ts").unwrap();
    assert_eq!(result.resolved_path.as_deref(), Some("src/util.ts"));
}

#[test]
fn test_unresolved_reports_every_strategy_tried() {
    let orchestrator = orchestrator(&[("src/index.ts", "")]);
    let result = orchestrator.resolve("features/auth", "src/index.ts").unwrap();

    assert_eq!(result.strategy, Strategy::External);
    assert!(!result.exists);
    let reason = result.failure_reason.unwrap();
    assert!(reason.contains("alias"));
    assert!(reason.contains("absolute"));
    assert!(result.trace.contains(&"src/features/auth.ts".to_string()));
    assert!(result.trace.contains(&"features/auth/index.ts".to_string()));
}
