//! Import resolution for static analysis.
//!
//! A set of resolver strategies share one contract ([`ImportResolver`]): a
//! priority, a claim predicate and a resolve function. The
//! [`ImportOrchestrator`] holds them sorted by priority and implements
//! claim-with-fallback dispatch: a strategy claiming an import only declares
//! that it applies, and a failed attempt falls through to the next claimant.
//!
//! ```text
//!   specifier ──► external? ──yes──► Resolution::external
//!                    │ no
//!                    ▼
//!   Relative(100) ─► Alias(90) ─► Framework(80) ─► Absolute(50)
//!        │              │              │                │
//!        └──────────────┴──────┬───────┴────────────────┘
//!                              ▼
//!                   validate_path (extensions, index files)
//! ```

mod absolute;
mod aliases;
mod external;
mod framework;
mod orchestrator;
mod relative;
mod validator;

pub use absolute::AbsoluteResolver;
pub use aliases::{AliasResolver, match_custom_alias, normalize_alias_map};
pub use external::{BUILTIN_MODULES, extract_package_name, is_external_package, is_relative};
pub use framework::FrameworkResolver;
pub use orchestrator::ImportOrchestrator;
pub use relative::{RelativeResolver, fold_segments, resolve_relative_base};
pub use validator::{EXTENSIONS, PathCheck, validate_path};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

use crate::config::FrameworkConfig;
use crate::snapshot::FileSet;

/// Which strategy produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Relative,
    Alias,
    Framework,
    Absolute,
    External,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relative => "relative",
            Self::Alias => "alias",
            Self::Framework => "framework",
            Self::Absolute => "absolute",
            Self::External => "external",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of resolving one import specifier.
///
/// `exists == true` implies `resolved_path` is `Some` and names a known file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub resolved_path: Option<String>,
    pub strategy: Strategy,
    pub exists: bool,
    /// Every candidate path attempted, in order.
    pub trace: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl Resolution {
    pub fn found(strategy: Strategy, path: impl Into<String>, trace: Vec<String>) -> Self {
        Self {
            resolved_path: Some(path.into()),
            strategy,
            exists: true,
            trace,
            failure_reason: None,
        }
    }

    pub fn not_found(strategy: Strategy, reason: impl Into<String>, trace: Vec<String>) -> Self {
        Self {
            resolved_path: None,
            strategy,
            exists: false,
            trace,
            failure_reason: Some(reason.into()),
        }
    }

    pub fn external(reason: impl Into<String>, trace: Vec<String>) -> Self {
        Self::not_found(Strategy::External, reason, trace)
    }

    /// Build a resolution from one validator check.
    pub fn from_check(strategy: Strategy, candidate: &str, check: PathCheck) -> Self {
        let reason = check.failure_message(candidate);
        match check.matched {
            Some(path) => Self::found(strategy, path, check.attempted),
            None => Self::not_found(strategy, reason, check.attempted),
        }
    }

    /// Whether this resolution contributes a graph edge.
    pub fn is_edge(&self) -> bool {
        self.exists && self.strategy != Strategy::External && self.resolved_path.is_some()
    }
}

/// One import as seen from its importing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResolution {
    pub from: String,
    pub specifier: String,
    pub resolution: Resolution,
}

/// Project-level state every resolver reads: known files, the active
/// framework and the custom alias map.
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    files: Arc<FileSet>,
    framework: Option<FrameworkConfig>,
    configured: HashMap<String, String>,
    aliases: HashMap<String, String>,
}

impl ResolutionContext {
    pub fn new(files: impl Into<Arc<FileSet>>) -> Self {
        Self {
            files: files.into(),
            ..Self::default()
        }
    }

    /// Set the active framework. Its alias map joins the custom alias map.
    pub fn with_framework(mut self, framework: Option<FrameworkConfig>) -> Self {
        self.framework = framework;
        self.merge_aliases();
        self
    }

    /// Add custom aliases (`"@lib/*" -> "src/lib/*"` style keys are accepted).
    pub fn with_aliases(mut self, aliases: &BTreeMap<String, String>) -> Self {
        self.configured.extend(normalize_alias_map(aliases));
        self.merge_aliases();
        self
    }

    pub fn files(&self) -> &FileSet {
        &self.files
    }

    pub fn framework(&self) -> Option<&FrameworkConfig> {
        self.framework.as_ref()
    }

    /// Configured aliases merged with the active framework's alias map.
    ///
    /// Explicitly configured aliases win over framework ones.
    pub fn custom_aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }

    fn merge_aliases(&mut self) {
        let mut merged = self
            .framework
            .as_ref()
            .and_then(|f| f.alias_map.as_ref())
            .map(normalize_alias_map)
            .unwrap_or_default();
        merged.extend(self.configured.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.aliases = merged;
    }
}

/// Shared contract of every resolution strategy.
pub trait ImportResolver: Send + Sync + fmt::Debug {
    /// Name used in traces and logs.
    fn name(&self) -> &'static str;

    /// Higher priorities are tried first.
    fn priority(&self) -> u32;

    /// Whether this strategy applies to the specifier. Claiming is not a
    /// promise of success.
    fn can_resolve(&self, specifier: &str, ctx: &ResolutionContext) -> bool;

    /// Attempt resolution of `specifier` imported from the file `from`.
    fn resolve(&self, specifier: &str, from: &str, ctx: &ResolutionContext) -> Resolution;
}

/// Try `candidates` in order, returning the first that validates.
///
/// The returned trace accumulates every attempted path across candidates.
pub(crate) fn first_valid(
    strategy: Strategy,
    candidates: &[String],
    files: &FileSet,
) -> Resolution {
    let mut trace = Vec::new();
    for candidate in candidates {
        let check = validate_path(candidate, files);
        trace.extend(check.attempted.iter().cloned());
        if let Some(path) = check.matched {
            return Resolution::found(strategy, path, trace);
        }
    }
    let reason = match candidates {
        [] => "no candidate base path".to_string(),
        [only] => format!("no known file matches '{only}'"),
        _ => format!("no known file matches any of: {}", candidates.join(", ")),
    };
    Resolution::not_found(strategy, reason, trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_invariants() {
        let found = Resolution::found(Strategy::Relative, "a.ts", vec!["a.ts".into()]);
        assert!(found.exists);
        assert!(found.is_edge());

        let external = Resolution::external("bare package", Vec::new());
        assert!(!external.exists);
        assert!(!external.is_edge());
        assert_eq!(external.strategy, Strategy::External);
    }

    #[test]
    fn test_first_valid_accumulates_trace() {
        let files = FileSet::from_paths(["lib/a.ts"]);
        let result = first_valid(
            Strategy::Absolute,
            &["src/a".to_string(), "lib/a".to_string()],
            &files,
        );

        assert_eq!(result.resolved_path.as_deref(), Some("lib/a.ts"));
        assert!(result.trace.contains(&"src/a.ts".to_string()));
        assert_eq!(result.trace.last().map(String::as_str), Some("lib/a.ts"));
    }

    #[test]
    fn test_resolution_serializes_camel_case() {
        let resolution = Resolution::found(Strategy::Alias, "src/a.ts", Vec::new());
        let json = serde_json::to_value(&resolution).unwrap();
        assert_eq!(json["resolvedPath"], "src/a.ts");
        assert_eq!(json["strategy"], "alias");
        assert!(json.get("failureReason").is_none());
    }

    #[test]
    fn test_context_alias_precedence() {
        let framework = FrameworkConfig {
            name: "generic".to_string(),
            alias_map: Some(BTreeMap::from([
                ("@ui".to_string(), "packages/ui".to_string()),
                ("@app".to_string(), "app".to_string()),
            ])),
            convention_directories: Vec::new(),
        };
        let ctx = ResolutionContext::new(FileSet::default())
            .with_framework(Some(framework))
            .with_aliases(&BTreeMap::from([("@ui/*".to_string(), "src/ui/*".to_string())]));

        let aliases = ctx.custom_aliases();
        assert_eq!(aliases.get("@ui").map(String::as_str), Some("src/ui"));
        assert_eq!(aliases.get("@app").map(String::as_str), Some("app"));
    }
}
