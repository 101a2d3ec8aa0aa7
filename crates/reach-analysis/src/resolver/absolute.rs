//! Catch-all resolution of project-rooted paths.

use super::external::{is_external_package, is_relative};
use super::{ImportResolver, Resolution, ResolutionContext, Strategy, first_valid};

/// Base directories tried after the unmodified path.
const BASE_PREFIXES: &[&str] = &["src/", "lib/", "app/", ""];

/// Lowest-priority resolver: any non-relative, non-external path.
#[derive(Debug, Default, Clone, Copy)]
pub struct AbsoluteResolver;

impl AbsoluteResolver {
    pub const PRIORITY: u32 = 50;
}

impl ImportResolver for AbsoluteResolver {
    fn name(&self) -> &'static str {
        "absolute"
    }

    fn priority(&self) -> u32 {
        Self::PRIORITY
    }

    fn can_resolve(&self, specifier: &str, ctx: &ResolutionContext) -> bool {
        !specifier.is_empty()
            && !is_relative(specifier)
            && !is_external_package(specifier, ctx.custom_aliases())
    }

    fn resolve(&self, specifier: &str, _from: &str, ctx: &ResolutionContext) -> Resolution {
        let path = specifier.trim_start_matches('/');
        let mut candidates = vec![path.to_string()];
        for prefix in BASE_PREFIXES {
            let candidate = format!("{prefix}{path}");
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
        first_valid(Strategy::Absolute, &candidates, ctx.files())
    }
}
