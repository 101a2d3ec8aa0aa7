//! Remix: `app/root`, client/server entries and flat or nested routes.

use reach_graph::EntrySource;

use super::{FrameworkAnalyzer, file_name, is_root_file, is_script, stem};
use crate::config::FrameworkKind;

#[derive(Debug, Default, Clone, Copy)]
pub struct RemixAnalyzer;

impl FrameworkAnalyzer for RemixAnalyzer {
    fn kind(&self) -> FrameworkKind {
        FrameworkKind::Remix
    }

    fn indicators(&self) -> &'static [&'static str] {
        &["remix.config.js", "remix.config.mjs", "remix.env.d.ts"]
    }

    fn hints(&self) -> &'static [&'static str] {
        &["remix"]
    }

    fn classify(&self, path: &str) -> Option<EntrySource> {
        if is_root_file(path, "remix.config") || is_root_file(path, "vite.config") {
            return Some(EntrySource::FrameworkConfig);
        }
        if !is_script(path) {
            return None;
        }
        let app = path.strip_prefix("app/")?;

        if !app.contains('/') {
            return match file_name(app) {
                name if stem(name) == "root" => Some(EntrySource::FrameworkPage),
                name if name.starts_with("entry.client.") || name.starts_with("entry.server.") => {
                    Some(EntrySource::FrameworkConfig)
                }
                _ => None,
            };
        }

        // Resource routes conventionally live under an `api` prefix.
        let route = app.strip_prefix("routes/")?;
        if route.starts_with("api.") || route.starts_with("api/") || route.contains("/api.") {
            Some(EntrySource::FrameworkApi)
        } else {
            Some(EntrySource::FrameworkPage)
        }
    }
}
