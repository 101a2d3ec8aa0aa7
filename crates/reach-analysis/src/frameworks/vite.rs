//! Vite single-page apps (Vue, React, vanilla).
//!
//! The HTML page is the real entry: `index.html` loads `src/main.*` through a
//! module script tag.

use once_cell::sync::Lazy;
use regex::Regex;

use reach_graph::{EntryPoint, EntrySource};

use super::{FrameworkAnalyzer, is_root_file, is_script, stem};
use crate::config::FrameworkKind;
use crate::resolver::{fold_segments, validate_path};
use crate::snapshot::Snapshot;

/// `<script type="module" src="/src/main.ts">`
static SCRIPT_SRC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<script\b[^>]*\bsrc\s*=\s*["']([^"']+)["']"#).expect("script src regex is valid")
});

#[derive(Debug, Default, Clone, Copy)]
pub struct ViteAnalyzer;

impl ViteAnalyzer {
    /// Files referenced by module script tags in HTML pages.
    fn html_entries(snapshot: &Snapshot) -> Vec<EntryPoint> {
        let mut entries = Vec::new();
        for record in snapshot.records() {
            if !record.path.ends_with(".html") {
                continue;
            }
            let Some(content) = record.content.as_deref() else {
                continue;
            };
            let dir = record.path.rsplit_once('/').map_or("", |(dir, _)| dir);
            for captures in SCRIPT_SRC.captures_iter(content) {
                let Some(src) = captures.get(1).map(|m| m.as_str()) else {
                    continue;
                };
                if src.contains("://") {
                    continue;
                }
                // Root-relative sources resolve from the project root.
                let base = match src.strip_prefix('/') {
                    Some(rooted) => fold_segments("", rooted),
                    None => fold_segments(dir, src),
                };
                if let Some(path) = validate_path(&base, snapshot.files()).matched {
                    entries.push(EntryPoint::new(path, EntrySource::FrameworkPage));
                }
            }
        }
        entries
    }
}

impl FrameworkAnalyzer for ViteAnalyzer {
    fn kind(&self) -> FrameworkKind {
        FrameworkKind::Vite
    }

    fn indicators(&self) -> &'static [&'static str] {
        &["vite.config.ts", "vite.config.js", "vite.config.mjs", "vite.config.mts"]
    }

    fn hints(&self) -> &'static [&'static str] {
        &["vite", "vue"]
    }

    fn classify(&self, path: &str) -> Option<EntrySource> {
        if is_root_file(path, "vite.config") || path == "index.html" {
            return Some(EntrySource::FrameworkConfig);
        }
        let top = path.strip_prefix("src/")?;
        (is_script(top) && !top.contains('/') && stem(top) == "main")
            .then_some(EntrySource::FrameworkPage)
    }

    fn detect_entry_points(&self, snapshot: &Snapshot) -> Vec<EntryPoint> {
        let mut entries: Vec<EntryPoint> = snapshot
            .paths()
            .filter_map(|path| self.classify(path).map(|source| EntryPoint::new(path, source)))
            .collect();
        for entry in Self::html_entries(snapshot) {
            if !entries.iter().any(|e| e.path == entry.path) {
                entries.push(entry);
            }
        }
        entries
    }
}
