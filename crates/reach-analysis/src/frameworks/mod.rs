//! Framework analyzers.
//!
//! Each framework contributes three things: whether it is present, which
//! files its routing conventions make live, and which files it loads through
//! dynamic imports. The shared behavior lives in default methods of
//! [`FrameworkAnalyzer`]; variants only supply their indicator files and a
//! path classifier, overriding the defaults where the framework needs more
//! (Nuxt reads directory overrides from its config, Vite follows
//! `index.html` script tags).

mod astro;
mod gatsby;
mod next;
mod nuxt;
mod remix;
mod sveltekit;
mod vite;

pub use astro::AstroAnalyzer;
pub use gatsby::GatsbyAnalyzer;
pub use next::NextAnalyzer;
pub use nuxt::{NuxtAnalyzer, NuxtDirs};
pub use remix::RemixAnalyzer;
pub use sveltekit::SvelteKitAnalyzer;
pub use vite::ViteAnalyzer;

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet as HashSet;

use reach_graph::{EntryPoint, EntrySource};

use crate::config::{FrameworkConfig, FrameworkKind};
use crate::manifest::FrameworkHints;
use crate::resolver::{is_relative, resolve_relative_base, validate_path};
use crate::snapshot::Snapshot;

/// `import('./x')`
static DYNAMIC_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bimport\s*\(\s*['"`]([^'"`]+)['"`]\s*\)"#).expect("dynamic import regex is valid")
});

/// `lazy(() => import('./x'))`, `defineAsyncComponent(async () => { return import('./x') })`
static LAZY_WRAPPER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\b(?:lazy|defineAsyncComponent|loadable|dynamic)\s*\(\s*(?:async\s*)?\(\s*\)\s*=>\s*(?:\{\s*return\s+)?import\s*\(\s*['"`]([^'"`]+)['"`]"#,
    )
    .expect("lazy wrapper regex is valid")
});

/// Extensions of files that can be routes or hooks.
pub(crate) const SCRIPT_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "mts", "cts"];

/// Shared capability of every framework variant.
pub trait FrameworkAnalyzer: Send + Sync + fmt::Debug {
    fn kind(&self) -> FrameworkKind;

    /// File names whose presence identifies the framework.
    fn indicators(&self) -> &'static [&'static str];

    /// Manifest hint names that identify the framework.
    fn hints(&self) -> &'static [&'static str];

    /// Entry tag for a path under the framework's conventions, if any.
    fn classify(&self, path: &str) -> Option<EntrySource>;

    fn is_framework_detected(&self, snapshot: &Snapshot) -> bool {
        snapshot.paths().any(|path| {
            self.indicators()
                .iter()
                .any(|indicator| matches_indicator(path, indicator))
        })
    }

    fn detect_entry_points(&self, snapshot: &Snapshot) -> Vec<EntryPoint> {
        snapshot
            .paths()
            .filter_map(|path| self.classify(path).map(|source| EntryPoint::new(path, source)))
            .collect()
    }

    /// Files loaded through dynamic imports, in record order.
    fn detect_usage(&self, snapshot: &Snapshot) -> Vec<String> {
        scan_dynamic_usage(snapshot)
    }

    fn config(&self) -> FrameworkConfig {
        FrameworkConfig::for_kind(self.kind())
    }
}

/// Every framework analyzer, in detection order.
pub fn all_analyzers() -> Vec<Box<dyn FrameworkAnalyzer>> {
    FrameworkKind::ALL
        .iter()
        .filter_map(|kind| analyzer_for(*kind))
        .collect()
}

/// The analyzer for one framework. `Generic` has none.
pub fn analyzer_for(kind: FrameworkKind) -> Option<Box<dyn FrameworkAnalyzer>> {
    let analyzer: Box<dyn FrameworkAnalyzer> = match kind {
        FrameworkKind::Next => Box::new(NextAnalyzer),
        FrameworkKind::Nuxt => Box::new(NuxtAnalyzer),
        FrameworkKind::SvelteKit => Box::new(SvelteKitAnalyzer),
        FrameworkKind::Remix => Box::new(RemixAnalyzer),
        FrameworkKind::Astro => Box::new(AstroAnalyzer),
        FrameworkKind::Gatsby => Box::new(GatsbyAnalyzer),
        FrameworkKind::Vite => Box::new(ViteAnalyzer),
        FrameworkKind::Generic => return None,
    };
    Some(analyzer)
}

/// Detect the project's framework.
///
/// Indicator files win over manifest hints; within each pass the first
/// framework in detection order wins.
pub fn detect_framework(snapshot: &Snapshot, hints: &FrameworkHints) -> Option<FrameworkConfig> {
    let analyzers = all_analyzers();
    let detected = analyzers
        .iter()
        .find(|a| a.is_framework_detected(snapshot))
        .or_else(|| {
            analyzers
                .iter()
                .find(|a| a.hints().iter().any(|hint| hints.is_set(hint)))
        })?;

    tracing::debug!(framework = %detected.kind(), "framework detected");
    Some(detected.config())
}

/// Scan file contents for dynamic imports and resolve relative targets.
pub fn scan_dynamic_usage(snapshot: &Snapshot) -> Vec<String> {
    let mut seen = HashSet::default();
    let mut used = Vec::new();

    for record in snapshot.records() {
        let Some(content) = record.content.as_deref() else {
            continue;
        };
        let specifiers = DYNAMIC_IMPORT
            .captures_iter(content)
            .chain(LAZY_WRAPPER.captures_iter(content))
            .filter_map(|captures| captures.get(1))
            .map(|m| m.as_str());

        for specifier in specifiers {
            if !is_relative(specifier) || specifier.contains("${") {
                continue;
            }
            let base = resolve_relative_base(&record.path, specifier);
            let Some(path) = validate_path(&base, snapshot.files()).matched else {
                tracing::trace!(from = %record.path, specifier, "dynamic import unresolved");
                continue;
            };
            if seen.insert(path.clone()) {
                used.push(path);
            }
        }
    }

    used
}

fn matches_indicator(path: &str, indicator: &str) -> bool {
    path == indicator
        || path
            .strip_suffix(indicator)
            .is_some_and(|prefix| prefix.ends_with('/'))
}

pub(crate) fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// File name up to its first dot: `page.tsx` -> `page`, `+page.server.ts` -> `+page`.
pub(crate) fn stem(path: &str) -> &str {
    let name = file_name(path);
    name.split('.').next().unwrap_or(name)
}

pub(crate) fn extension(path: &str) -> &str {
    let name = file_name(path);
    name.rsplit_once('.').map_or("", |(_, ext)| ext)
}

pub(crate) fn is_script(path: &str) -> bool {
    SCRIPT_EXTENSIONS.contains(&extension(path)) && !path.ends_with(".d.ts")
}

/// A root-level file named `<base>.<ext>`, like `next.config.mjs`.
pub(crate) fn is_root_file(path: &str, base: &str) -> bool {
    !path.contains('/')
        && path
            .strip_prefix(base)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// `path` with a leading `src/` removed.
pub(crate) fn strip_src(path: &str) -> &str {
    path.strip_prefix("src/").unwrap_or(path)
}
