//! Analyzer inputs that describe the project rather than its files.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use reach_graph::DEFAULT_COUPLING_THRESHOLD;

/// Known framework families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameworkKind {
    Next,
    Nuxt,
    SvelteKit,
    Remix,
    Astro,
    Gatsby,
    /// Vite single-page apps, including Vue.
    Vite,
    /// Anything else: resolution is driven by the config's alias map.
    Generic,
}

impl FrameworkKind {
    /// Every concrete framework, in detection order.
    pub const ALL: [FrameworkKind; 7] = [
        Self::Next,
        Self::Nuxt,
        Self::SvelteKit,
        Self::Remix,
        Self::Astro,
        Self::Gatsby,
        Self::Vite,
    ];

    /// Parse a user-facing framework name. Unknown names map to `Generic`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "next" | "nextjs" | "next.js" => Self::Next,
            "nuxt" | "nuxtjs" | "nuxt.js" => Self::Nuxt,
            "sveltekit" | "svelte-kit" | "svelte" => Self::SvelteKit,
            "remix" => Self::Remix,
            "astro" => Self::Astro,
            "gatsby" => Self::Gatsby,
            "vite" | "vue" => Self::Vite,
            _ => Self::Generic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Nuxt => "nuxt",
            Self::SvelteKit => "sveltekit",
            Self::Remix => "remix",
            Self::Astro => "astro",
            Self::Gatsby => "gatsby",
            Self::Vite => "vite",
            Self::Generic => "generic",
        }
    }

    /// Directories the framework treats as structurally significant.
    pub fn default_convention_directories(&self) -> &'static [&'static str] {
        match self {
            Self::Next => &["app", "pages", "components", "lib", "hooks", "styles"],
            Self::Nuxt => &[
                "pages",
                "components",
                "layouts",
                "composables",
                "middleware",
                "plugins",
                "server",
                "utils",
                "stores",
            ],
            Self::SvelteKit => &["routes", "lib", "components"],
            Self::Remix => &["routes", "components", "utils", "models"],
            Self::Astro => &["pages", "components", "layouts", "content"],
            Self::Gatsby => &["pages", "components", "templates"],
            Self::Vite => &["components", "views", "router", "stores", "composables"],
            Self::Generic => &["components", "views", "pages"],
        }
    }

    /// Base directories convention paths are rooted at, most likely first.
    /// Import prefixes the framework maps to project directories.
    pub fn default_aliases(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::SvelteKit => &[("$lib", "src/lib")],
            _ => &[],
        }
    }

    pub fn base_directories(&self) -> &'static [&'static str] {
        match self {
            Self::Next => &["src", ""],
            Self::Nuxt => &["", "src"],
            Self::Remix => &["app"],
            Self::SvelteKit | Self::Astro | Self::Gatsby | Self::Vite | Self::Generic => &["src"],
        }
    }
}

impl fmt::Display for FrameworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active framework of one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkConfig {
    pub name: String,
    #[serde(default)]
    pub alias_map: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub convention_directories: Vec<String>,
}

impl FrameworkConfig {
    /// Config for a known framework with its default convention directories.
    pub fn for_kind(kind: FrameworkKind) -> Self {
        let aliases = kind.default_aliases();
        Self {
            name: kind.as_str().to_string(),
            alias_map: (!aliases.is_empty()).then(|| {
                aliases
                    .iter()
                    .map(|(key, target)| (key.to_string(), target.to_string()))
                    .collect()
            }),
            convention_directories: kind
                .default_convention_directories()
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }

    pub fn kind(&self) -> FrameworkKind {
        FrameworkKind::from_name(&self.name)
    }

    /// Add aliases on top of the framework's own. Given keys replace defaults.
    pub fn with_alias_map(mut self, aliases: BTreeMap<String, String>) -> Self {
        self.alias_map.get_or_insert_with(BTreeMap::new).extend(aliases);
        self
    }

    pub fn with_convention_directories<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.convention_directories = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `dir` is a convention directory. An empty list falls back to
    /// the framework's defaults.
    pub fn is_convention_directory(&self, dir: &str) -> bool {
        if self.convention_directories.is_empty() {
            self.kind().default_convention_directories().contains(&dir)
        } else {
            self.convention_directories.iter().any(|d| d.trim_matches('/') == dir)
        }
    }
}

/// Tunables of one analysis pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Files with more distinct dependencies than this are reported.
    pub coupling_threshold: usize,
    /// Custom aliases merged into the alias resolver.
    pub path_aliases: BTreeMap<String, String>,
    /// Extra entry points declared by the user.
    pub entries: Vec<String>,
    pub framework: Option<FrameworkConfig>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            coupling_threshold: DEFAULT_COUPLING_THRESHOLD,
            path_aliases: BTreeMap::new(),
            entries: Vec::new(),
            framework: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_names() {
        assert_eq!(FrameworkKind::from_name("Next.js"), FrameworkKind::Next);
        assert_eq!(FrameworkKind::from_name("svelte-kit"), FrameworkKind::SvelteKit);
        assert_eq!(FrameworkKind::from_name("vue"), FrameworkKind::Vite);
        assert_eq!(FrameworkKind::from_name("qwik"), FrameworkKind::Generic);
    }

    #[test]
    fn test_sveltekit_maps_lib_alias() {
        let config = FrameworkConfig::for_kind(FrameworkKind::SvelteKit);
        let aliases = config.alias_map.unwrap();
        assert_eq!(aliases.get("$lib").map(String::as_str), Some("src/lib"));

        assert!(FrameworkConfig::for_kind(FrameworkKind::Next).alias_map.is_none());
    }

    #[test]
    fn test_alias_map_extends_framework_defaults() {
        let config = FrameworkConfig::for_kind(FrameworkKind::SvelteKit)
            .with_alias_map(BTreeMap::from([("$ui".to_string(), "src/ui".to_string())]));
        let aliases = config.alias_map.unwrap();
        assert_eq!(aliases.len(), 2);
        assert_eq!(aliases.get("$lib").map(String::as_str), Some("src/lib"));
    }

    #[test]
    fn test_convention_directories_fall_back_to_defaults() {
        let config = FrameworkConfig {
            name: "nuxt".to_string(),
            alias_map: None,
            convention_directories: Vec::new(),
        };
        assert!(config.is_convention_directory("composables"));

        let config = config.with_convention_directories(["views/"]);
        assert!(config.is_convention_directory("views"));
        assert!(!config.is_convention_directory("composables"));
    }

    #[test]
    fn test_framework_config_deserializes() {
        let config: FrameworkConfig = serde_json::from_str(
            r#"{ "name": "custom", "aliasMap": { "@ui": "packages/ui" }, "conventionDirectories": ["widgets"] }"#,
        )
        .unwrap();

        assert_eq!(config.kind(), FrameworkKind::Generic);
        assert_eq!(config.convention_directories, vec!["widgets"]);
    }
}
