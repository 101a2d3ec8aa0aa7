//! Next.js: app router, pages router, middleware and instrumentation.

use reach_graph::EntrySource;

use super::{FrameworkAnalyzer, is_root_file, is_script, stem, strip_src};
use crate::config::FrameworkKind;

/// App router file conventions that render UI.
const APP_PAGE_FILES: &[&str] = &[
    "page",
    "layout",
    "loading",
    "error",
    "global-error",
    "not-found",
    "template",
    "default",
    "opengraph-image",
    "twitter-image",
    "icon",
    "apple-icon",
    "sitemap",
    "robots",
    "manifest",
];

#[derive(Debug, Default, Clone, Copy)]
pub struct NextAnalyzer;

impl FrameworkAnalyzer for NextAnalyzer {
    fn kind(&self) -> FrameworkKind {
        FrameworkKind::Next
    }

    fn indicators(&self) -> &'static [&'static str] {
        &[
            "next.config.js",
            "next.config.mjs",
            "next.config.ts",
            "next-env.d.ts",
        ]
    }

    fn hints(&self) -> &'static [&'static str] {
        &["next"]
    }

    fn classify(&self, path: &str) -> Option<EntrySource> {
        if is_root_file(path, "next.config") {
            return Some(EntrySource::FrameworkConfig);
        }
        if !is_script(path) {
            return None;
        }

        let relative = strip_src(path);
        if !relative.contains('/') {
            return matches!(stem(relative), "middleware" | "instrumentation")
                .then_some(EntrySource::FrameworkConfig);
        }

        if let Some(route) = relative.strip_prefix("app/") {
            let name = stem(route);
            if name == "route" {
                return Some(EntrySource::FrameworkApi);
            }
            return APP_PAGE_FILES
                .contains(&name)
                .then_some(EntrySource::FrameworkPage);
        }

        relative.strip_prefix("pages/").map(|page| {
            if page.starts_with("api/") {
                EntrySource::FrameworkApi
            } else {
                EntrySource::FrameworkPage
            }
        })
    }
}
