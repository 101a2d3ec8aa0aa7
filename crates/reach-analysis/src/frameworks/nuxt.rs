//! Nuxt: file-based pages, layouts, middleware, plugins and server routes.

use once_cell::sync::Lazy;
use regex::Regex;

use reach_graph::{EntryPoint, EntrySource};

use super::{FrameworkAnalyzer, extension, is_root_file, is_script, strip_src};
use crate::config::FrameworkKind;
use crate::snapshot::Snapshot;

/// The `dir: { ... }` block of `nuxt.config.*`. Nested objects are not supported.
static DIR_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bdir\s*:\s*\{([^{}]*)\}").expect("dir block regex is valid"));

/// `pages: 'routes'` inside the dir block.
static DIR_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"['"]?(\w+)['"]?\s*:\s*['"]([^'"]+)['"]"#).expect("dir entry regex is valid")
});

/// Directory names Nuxt treats as routing or plugin roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NuxtDirs {
    pub pages: String,
    pub layouts: String,
    pub middleware: String,
    pub plugins: String,
}

impl Default for NuxtDirs {
    fn default() -> Self {
        Self {
            pages: "pages".to_string(),
            layouts: "layouts".to_string(),
            middleware: "middleware".to_string(),
            plugins: "plugins".to_string(),
        }
    }
}

impl NuxtDirs {
    /// Directory overrides from raw `nuxt.config` text.
    ///
    /// Best effort: anything that does not parse keeps its default.
    pub fn from_config(source: &str) -> Self {
        let mut dirs = Self::default();
        let Some(block) = DIR_BLOCK.captures(source).and_then(|c| c.get(1)) else {
            return dirs;
        };

        for captures in DIR_ENTRY.captures_iter(block.as_str()) {
            let (Some(key), Some(value)) = (captures.get(1), captures.get(2)) else {
                continue;
            };
            let value = value.as_str().trim_matches('/').trim_start_matches("./");
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_str() {
                "pages" => &mut dirs.pages,
                "layouts" => &mut dirs.layouts,
                "middleware" => &mut dirs.middleware,
                "plugins" => &mut dirs.plugins,
                _ => continue,
            };
            *slot = value.to_string();
        }
        dirs
    }

    /// Overrides declared by the project's `nuxt.config.*`, if any.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        snapshot
            .records()
            .iter()
            .find(|r| is_root_file(&r.path, "nuxt.config"))
            .and_then(|r| r.content.as_deref())
            .map(Self::from_config)
            .unwrap_or_default()
    }

    fn classify(&self, path: &str) -> Option<EntrySource> {
        if is_root_file(path, "nuxt.config") || is_root_file(path, "app.config") {
            return Some(EntrySource::FrameworkConfig);
        }

        let relative = strip_src(path);
        if !is_script(relative) && extension(relative) != "vue" {
            return None;
        }
        if matches!(relative, "app.vue" | "error.vue") {
            return Some(EntrySource::FrameworkPage);
        }
        if let Some(server) = relative.strip_prefix("server/") {
            return if server.starts_with("api/") || server.starts_with("routes/") {
                Some(EntrySource::FrameworkApi)
            } else if server.starts_with("middleware/") || server.starts_with("plugins/") {
                Some(EntrySource::FrameworkConfig)
            } else {
                None
            };
        }

        let under = |dir: &str| {
            relative
                .strip_prefix(dir)
                .is_some_and(|rest| rest.starts_with('/'))
        };
        if under(&self.pages) || under(&self.layouts) {
            Some(EntrySource::FrameworkPage)
        } else if under(&self.middleware) || under(&self.plugins) {
            Some(EntrySource::FrameworkConfig)
        } else {
            None
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NuxtAnalyzer;

impl FrameworkAnalyzer for NuxtAnalyzer {
    fn kind(&self) -> FrameworkKind {
        FrameworkKind::Nuxt
    }

    fn indicators(&self) -> &'static [&'static str] {
        &["nuxt.config.ts", "nuxt.config.js", "nuxt.config.mjs", ".nuxtrc"]
    }

    fn hints(&self) -> &'static [&'static str] {
        &["nuxt"]
    }

    fn classify(&self, path: &str) -> Option<EntrySource> {
        NuxtDirs::default().classify(path)
    }

    fn detect_entry_points(&self, snapshot: &Snapshot) -> Vec<EntryPoint> {
        let dirs = NuxtDirs::from_snapshot(snapshot);
        if dirs != NuxtDirs::default() {
            tracing::debug!(?dirs, "nuxt directory overrides");
        }
        snapshot
            .paths()
            .filter_map(|path| dirs.classify(path).map(|source| EntryPoint::new(path, source)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::FileRecord;

    #[test]
    fn test_default_conventions() {
        let dirs = NuxtDirs::default();
        assert_eq!(dirs.classify("pages/index.vue"), Some(EntrySource::FrameworkPage));
        assert_eq!(dirs.classify("layouts/default.vue"), Some(EntrySource::FrameworkPage));
        assert_eq!(dirs.classify("app.vue"), Some(EntrySource::FrameworkPage));
        assert_eq!(dirs.classify("middleware/auth.ts"), Some(EntrySource::FrameworkConfig));
        assert_eq!(dirs.classify("plugins/sentry.client.ts"), Some(EntrySource::FrameworkConfig));
        assert_eq!(dirs.classify("server/api/users.get.ts"), Some(EntrySource::FrameworkApi));
        assert_eq!(dirs.classify("server/utils/db.ts"), None);
        assert_eq!(dirs.classify("components/Header.vue"), None);
        assert_eq!(dirs.classify("nuxt.config.ts"), Some(EntrySource::FrameworkConfig));
    }

    #[test]
    fn test_dir_override_extraction() {
        let dirs = NuxtDirs::from_config(
            r#"export default defineNuxtConfig({
                ssr: true,
                dir: {
                    pages: 'routes',
                    "layouts": "./templates/",
                    assets: 'static',
                },
            })"#,
        );

        assert_eq!(dirs.pages, "routes");
        assert_eq!(dirs.layouts, "templates");
        assert_eq!(dirs.middleware, "middleware");
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        assert_eq!(NuxtDirs::from_config("dir: { pages: "), NuxtDirs::default());
        assert_eq!(NuxtDirs::from_config("dir: getDirs()"), NuxtDirs::default());
        assert_eq!(NuxtDirs::from_config(""), NuxtDirs::default());
    }

    #[test]
    fn test_entry_points_follow_overrides() {
        let snapshot = Snapshot::new([
            FileRecord::new("nuxt.config.ts", "export default { dir: { pages: 'views' } }"),
            FileRecord::new("views/index.vue", ""),
            FileRecord::new("pages/old.vue", ""),
        ]);

        let entries = NuxtAnalyzer.detect_entry_points(&snapshot);
        let paths: Vec<_> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["nuxt.config.ts", "views/index.vue"]);
    }
}
