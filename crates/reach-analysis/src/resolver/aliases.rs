//! Path alias handling for module resolution.
//!
//! Handles the conventional `@/`, `~/` and `#/` prefixes, custom alias maps
//! (`"@lib/*" -> "src/lib/*"`) and a heuristic `src/` fallback for bare
//! project paths such as `components/button`.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap as HashMap;

use super::external::{ALIAS_PREFIXES, is_external_package, is_relative};
use super::{ImportResolver, Resolution, ResolutionContext, Strategy, first_valid};
use crate::snapshot::normalize_path;

/// Normalize alias keys and targets.
///
/// Strips tsconfig-style `/*` wildcards and trailing separators from keys,
/// and a leading `./` plus wildcards from targets. Empty keys are dropped.
pub fn normalize_alias_map(aliases: &BTreeMap<String, String>) -> HashMap<String, String> {
    aliases
        .iter()
        .filter_map(|(key, target)| {
            let key = key.strip_suffix("/*").unwrap_or(key).trim_end_matches('/');
            if key.is_empty() {
                return None;
            }
            let target = target.strip_suffix("/*").unwrap_or(target);
            let target = normalize_path(target.strip_prefix("./").unwrap_or(target));
            Some((key.to_string(), target))
        })
        .collect()
}

/// Rewrite `specifier` through the custom alias map.
///
/// A key matches the whole specifier or a prefix followed by `/`. The
/// longest matching key wins, so `@app/ui` beats `@app` regardless of map
/// iteration order.
pub fn match_custom_alias(specifier: &str, aliases: &HashMap<String, String>) -> Option<String> {
    let (key, target) = aliases
        .iter()
        .filter(|(key, _)| {
            specifier == key.as_str()
                || specifier
                    .strip_prefix(key.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
        .max_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| b.cmp(a)))?;

    let rest = specifier[key.len()..].trim_start_matches('/');
    Some(match (target.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (false, true) => target.clone(),
        (false, false) => format!("{target}/{rest}"),
    })
}

/// Resolves alias-prefixed and bare project paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct AliasResolver;

impl AliasResolver {
    pub const PRIORITY: u32 = 90;

    fn candidates(specifier: &str, ctx: &ResolutionContext) -> Vec<String> {
        let mut candidates = Vec::new();
        if let Some(rewritten) = match_custom_alias(specifier, ctx.custom_aliases()) {
            candidates.push(rewritten);
        }

        if let Some(rest) = specifier.strip_prefix("@/") {
            candidates.push(format!("src/{rest}"));
        } else if let Some(rest) = specifier.strip_prefix("#/") {
            candidates.push(format!("src/{rest}"));
        } else if let Some(rest) = specifier.strip_prefix("~/") {
            // `~/` means the source root in Nuxt and the project root elsewhere.
            candidates.push(format!("src/{rest}"));
            candidates.push(rest.to_string());
        } else if candidates.is_empty() {
            candidates.push(format!("src/{specifier}"));
        }

        candidates.dedup();
        candidates
    }
}

impl ImportResolver for AliasResolver {
    fn name(&self) -> &'static str {
        "alias"
    }

    fn priority(&self) -> u32 {
        Self::PRIORITY
    }

    fn can_resolve(&self, specifier: &str, ctx: &ResolutionContext) -> bool {
        if ALIAS_PREFIXES.iter().any(|prefix| specifier.starts_with(prefix)) {
            return true;
        }
        if match_custom_alias(specifier, ctx.custom_aliases()).is_some() {
            return true;
        }
        specifier.contains('/')
            && !specifier.starts_with('/')
            && !is_relative(specifier)
            && !is_external_package(specifier, ctx.custom_aliases())
    }

    fn resolve(&self, specifier: &str, _from: &str, ctx: &ResolutionContext) -> Resolution {
        let candidates = Self::candidates(specifier, ctx);
        tracing::trace!(specifier, ?candidates, "alias candidates");
        first_valid(Strategy::Alias, &candidates, ctx.files())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::FileSet;

    fn context(files: &[&str], aliases: &[(&str, &str)]) -> ResolutionContext {
        let map = aliases
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>();
        ResolutionContext::new(FileSet::from_paths(files)).with_aliases(&map)
    }

    #[test]
    fn test_at_prefix_maps_to_src() {
        let ctx = context(&["src/components/Button.tsx"], &[]);
        let result = AliasResolver.resolve("@/components/Button", "src/app.tsx", &ctx);

        assert!(result.exists);
        assert_eq!(result.strategy, Strategy::Alias);
        assert_eq!(result.resolved_path.as_deref(), Some("src/components/Button.tsx"));
        assert_eq!(result.trace[0], "src/components/Button");
    }

    #[test]
    fn test_tilde_tries_src_then_root() {
        let ctx = context(&["utils/format.ts"], &[]);
        let result = AliasResolver.resolve("~/utils/format", "src/app.ts", &ctx);

        assert_eq!(result.resolved_path.as_deref(), Some("utils/format.ts"));
        assert!(result.trace.contains(&"src/utils/format.ts".to_string()));

        let ctx = context(&["src/utils/format.ts", "utils/format.ts"], &[]);
        let result = AliasResolver.resolve("~/utils/format", "src/app.ts", &ctx);
        assert_eq!(result.resolved_path.as_deref(), Some("src/utils/format.ts"));
    }

    #[test]
    fn test_tilde_failure_reports_both_bases() {
        let ctx = context(&["src/other.ts"], &[]);
        let result = AliasResolver.resolve("~/missing", "src/app.ts", &ctx);

        assert!(!result.exists);
        let reason = result.failure_reason.unwrap();
        assert!(reason.contains("src/missing"));
        assert!(reason.contains("missing"));
    }

    #[test]
    fn test_custom_alias_longest_prefix_wins() {
        let ctx = context(
            &["src/app/ui/Card.tsx", "packages/ui/Card.tsx"],
            &[("@app/*", "src/app/*"), ("@app/ui/*", "packages/ui/*")],
        );
        let result = AliasResolver.resolve("@app/ui/Card", "src/index.ts", &ctx);
        assert_eq!(result.resolved_path.as_deref(), Some("packages/ui/Card.tsx"));
    }

    #[test]
    fn test_custom_alias_must_end_at_segment_boundary() {
        let aliases = normalize_alias_map(&BTreeMap::from([("@lib".into(), "src/lib".into())]));
        assert_eq!(match_custom_alias("@lib/a", &aliases).as_deref(), Some("src/lib/a"));
        assert_eq!(match_custom_alias("@lib", &aliases).as_deref(), Some("src/lib"));
        assert_eq!(match_custom_alias("@library/a", &aliases), None);
    }

    #[test]
    fn test_normalize_alias_map() {
        let map = normalize_alias_map(&BTreeMap::from([
            ("@lib/*".to_string(), "./src/lib/*".to_string()),
            ("@root/".to_string(), ".".to_string()),
            ("/*".to_string(), "src/*".to_string()),
        ]));

        assert_eq!(map.get("@lib").map(String::as_str), Some("src/lib"));
        assert_eq!(map.get("@root").map(String::as_str), Some(""));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_claims_bare_project_paths_but_not_packages() {
        let ctx = context(&[], &[]);
        assert!(AliasResolver.can_resolve("components/button", &ctx));
        assert!(AliasResolver.can_resolve("@/x", &ctx));
        assert!(!AliasResolver.can_resolve("react", &ctx));
        assert!(!AliasResolver.can_resolve("./x", &ctx));
        assert!(!AliasResolver.can_resolve("@mui/material", &ctx));
    }

    #[test]
    fn test_heuristic_fallback_prefixes_src() {
        let ctx = context(&["src/components/button/index.ts"], &[]);
        let result = AliasResolver.resolve("components/button", "src/a.ts", &ctx);
        assert_eq!(
            result.resolved_path.as_deref(),
            Some("src/components/button/index.ts")
        );
    }
}
