//! SvelteKit: `src/routes` `+` files and hooks.

use reach_graph::EntrySource;

use super::{FrameworkAnalyzer, extension, is_root_file, is_script, stem};
use crate::config::FrameworkKind;

#[derive(Debug, Default, Clone, Copy)]
pub struct SvelteKitAnalyzer;

impl FrameworkAnalyzer for SvelteKitAnalyzer {
    fn kind(&self) -> FrameworkKind {
        FrameworkKind::SvelteKit
    }

    fn indicators(&self) -> &'static [&'static str] {
        &["svelte.config.js", "svelte.config.ts", "svelte.config.mjs"]
    }

    fn hints(&self) -> &'static [&'static str] {
        &["sveltekit"]
    }

    fn classify(&self, path: &str) -> Option<EntrySource> {
        if is_root_file(path, "svelte.config") || is_root_file(path, "vite.config") {
            return Some(EntrySource::FrameworkConfig);
        }
        if !is_script(path) && extension(path) != "svelte" {
            return None;
        }

        if let Some(route) = path.strip_prefix("src/routes/") {
            return match stem(route) {
                "+page" | "+layout" | "+error" => Some(EntrySource::FrameworkPage),
                "+server" => Some(EntrySource::FrameworkApi),
                _ => None,
            };
        }

        let top = path.strip_prefix("src/")?;
        (!top.contains('/') && matches!(stem(top), "hooks" | "service-worker"))
            .then_some(EntrySource::FrameworkConfig)
    }
}
