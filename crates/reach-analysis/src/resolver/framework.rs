//! Framework convention directory resolution (`components/x`, `pages/y`).

use super::aliases::{match_custom_alias, normalize_alias_map};
use super::external::is_relative;
use super::{ImportResolver, Resolution, ResolutionContext, Strategy, first_valid};
use crate::config::FrameworkKind;

/// Resolves paths rooted at one of the active framework's convention
/// directories. Inactive without a framework config.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameworkResolver;

impl FrameworkResolver {
    pub const PRIORITY: u32 = 80;
}

impl ImportResolver for FrameworkResolver {
    fn name(&self) -> &'static str {
        "framework"
    }

    fn priority(&self) -> u32 {
        Self::PRIORITY
    }

    fn can_resolve(&self, specifier: &str, ctx: &ResolutionContext) -> bool {
        let Some(framework) = ctx.framework() else {
            return false;
        };
        if is_relative(specifier) || specifier.starts_with('/') {
            return false;
        }
        let first = specifier.split('/').next().unwrap_or_default();
        framework.is_convention_directory(first)
    }

    fn resolve(&self, specifier: &str, _from: &str, ctx: &ResolutionContext) -> Resolution {
        let Some(framework) = ctx.framework() else {
            return Resolution::not_found(Strategy::Framework, "no active framework", Vec::new());
        };

        let kind = framework.kind();
        let mut candidates = Vec::new();
        if kind == FrameworkKind::Generic {
            let aliases = framework
                .alias_map
                .as_ref()
                .map(normalize_alias_map)
                .unwrap_or_default();
            if let Some(rewritten) = match_custom_alias(specifier, &aliases) {
                candidates.push(rewritten);
            }
        }
        if candidates.is_empty() {
            candidates.extend(kind.base_directories().iter().map(|base| {
                if base.is_empty() {
                    specifier.to_string()
                } else {
                    format!("{base}/{specifier}")
                }
            }));
        }

        tracing::trace!(specifier, framework = %kind, ?candidates, "framework candidates");
        first_valid(Strategy::Framework, &candidates, ctx.files())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::config::FrameworkConfig;
    use crate::snapshot::FileSet;

    fn context(files: &[&str], framework: FrameworkConfig) -> ResolutionContext {
        ResolutionContext::new(FileSet::from_paths(files)).with_framework(Some(framework))
    }

    #[test]
    fn test_inactive_without_framework() {
        let ctx = ResolutionContext::new(FileSet::from_paths(["src/components/a.ts"]));
        assert!(!FrameworkResolver.can_resolve("components/a", &ctx));
    }

    #[test]
    fn test_claims_convention_directories_only() {
        let ctx = context(&[], FrameworkConfig::for_kind(FrameworkKind::Nuxt));
        assert!(FrameworkResolver.can_resolve("composables/useUser", &ctx));
        assert!(!FrameworkResolver.can_resolve("helpers/date", &ctx));
        assert!(!FrameworkResolver.can_resolve("./components/a", &ctx));
    }

    #[test]
    fn test_nuxt_prefers_project_root() {
        let ctx = context(
            &["components/Header.vue", "src/components/Header.vue"],
            FrameworkConfig::for_kind(FrameworkKind::Nuxt),
        );
        let result = FrameworkResolver.resolve("components/Header", "pages/index.vue", &ctx);
        assert_eq!(result.resolved_path.as_deref(), Some("components/Header.vue"));
        assert_eq!(result.strategy, Strategy::Framework);
    }

    #[test]
    fn test_remix_roots_at_app() {
        let ctx = context(
            &["app/components/Nav.tsx"],
            FrameworkConfig::for_kind(FrameworkKind::Remix),
        );
        let result = FrameworkResolver.resolve("components/Nav", "app/root.tsx", &ctx);
        assert_eq!(result.resolved_path.as_deref(), Some("app/components/Nav.tsx"));
    }

    #[test]
    fn test_generic_uses_alias_map_then_src() {
        let framework = FrameworkConfig {
            name: "in-house".to_string(),
            alias_map: Some(BTreeMap::from([(
                "widgets".to_string(),
                "packages/widgets".to_string(),
            )])),
            convention_directories: vec!["widgets".to_string(), "views".to_string()],
        };
        let ctx = context(&["packages/widgets/Clock.ts", "src/views/Home.ts"], framework);

        let widget = FrameworkResolver.resolve("widgets/Clock", "src/a.ts", &ctx);
        assert_eq!(widget.resolved_path.as_deref(), Some("packages/widgets/Clock.ts"));

        let view = FrameworkResolver.resolve("views/Home", "src/a.ts", &ctx);
        assert_eq!(view.resolved_path.as_deref(), Some("src/views/Home.ts"));
    }
}
