//! Astro: `src/pages` routes and endpoints, middleware, content config.

use reach_graph::EntrySource;

use super::{FrameworkAnalyzer, extension, is_root_file, is_script, stem};
use crate::config::FrameworkKind;

/// Page extensions that render HTML; scripts under `src/pages` are endpoints.
const PAGE_EXTENSIONS: &[&str] = &["astro", "md", "mdx", "html"];

#[derive(Debug, Default, Clone, Copy)]
pub struct AstroAnalyzer;

impl FrameworkAnalyzer for AstroAnalyzer {
    fn kind(&self) -> FrameworkKind {
        FrameworkKind::Astro
    }

    fn indicators(&self) -> &'static [&'static str] {
        &["astro.config.mjs", "astro.config.ts", "astro.config.js"]
    }

    fn hints(&self) -> &'static [&'static str] {
        &["astro"]
    }

    fn classify(&self, path: &str) -> Option<EntrySource> {
        if is_root_file(path, "astro.config") {
            return Some(EntrySource::FrameworkConfig);
        }

        if let Some(page) = path.strip_prefix("src/pages/") {
            if PAGE_EXTENSIONS.contains(&extension(page)) {
                return Some(EntrySource::FrameworkPage);
            }
            return is_script(page).then_some(EntrySource::FrameworkApi);
        }

        let top = path.strip_prefix("src/")?;
        if !is_script(top) {
            return None;
        }
        let is_hook = match top.split_once('/') {
            None => matches!(stem(top), "middleware" | "content"),
            Some(("middleware", rest)) => stem(rest) == "index",
            Some(("content", rest)) => stem(rest) == "config" && !rest.contains('/'),
            Some(_) => false,
        };
        is_hook.then_some(EntrySource::FrameworkConfig)
    }
}
