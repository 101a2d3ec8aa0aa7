//! The `ReachConfig` structure and its validation rules.
//!
//! For loading from disk and the environment, see the `discovery` module.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::settings::GlobalSettings;

/// Files with more distinct dependencies than this are reported as coupled.
pub const DEFAULT_COUPLING_THRESHOLD: usize = 10;

/// Directory names skipped when walking a project.
pub const DEFAULT_IGNORE: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    ".next",
    ".nuxt",
    ".svelte-kit",
    "coverage",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReachConfig {
    pub coupling_threshold: usize,

    /// Extra entry points, relative to the project root.
    pub entries: Vec<String>,

    /// Custom import aliases. tsconfig-style `"@lib/*": "src/lib/*"` keys are accepted.
    pub path_aliases: BTreeMap<String, String>,

    /// Explicit framework. When absent the CLI tries to detect one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<FrameworkSettings>,

    pub ignore: Vec<String>,

    pub settings: GlobalSettings,
}

impl Default for ReachConfig {
    fn default() -> Self {
        Self {
            coupling_threshold: DEFAULT_COUPLING_THRESHOLD,
            entries: Vec::new(),
            path_aliases: BTreeMap::new(),
            framework: None,
            ignore: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
            settings: GlobalSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkSettings {
    /// `next`, `nuxt`, `sveltekit`, `remix`, `astro`, `gatsby`, `vite`, or any
    /// other name for a generic setup driven by `alias_map`.
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub convention_directories: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_map: Option<BTreeMap<String, String>>,
}

impl FrameworkSettings {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl ReachConfig {
    /// Build from a JSON value, such as the `"reach"` field of a `package.json`.
    ///
    /// # Example
    ///
    /// ```
    /// use reach_config::ReachConfig;
    /// use serde_json::json;
    ///
    /// let config = ReachConfig::from_value(json!({
    ///     "coupling_threshold": 4,
    ///     "path_aliases": { "@lib/*": "src/lib/*" }
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(config.coupling_threshold, 4);
    /// assert_eq!(config.ignore.len(), 8);
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        let config: ReachConfig = serde_json::from_value(value)
            .map_err(|e| ConfigError::invalid("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::invalid("config", e.to_string()))
    }

    /// Reject values the analyzer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.coupling_threshold == 0 {
            return Err(ConfigError::invalid(
                "coupling_threshold",
                "must be at least 1",
            ));
        }

        if let Some(key) = self.path_aliases.keys().find(|k| is_blank_alias(k)) {
            return Err(ConfigError::invalid(
                "path_aliases",
                format!("alias key '{key}' is empty"),
            ));
        }

        if let Some(framework) = &self.framework {
            if framework.name.trim().is_empty() {
                return Err(ConfigError::invalid("framework.name", "must not be empty"));
            }
            let blank = framework
                .alias_map
                .iter()
                .flat_map(|map| map.keys())
                .any(|k| is_blank_alias(k));
            if blank {
                return Err(ConfigError::invalid(
                    "framework.alias_map",
                    "alias keys must not be empty",
                ));
            }
        }

        Ok(())
    }

    pub fn is_ignored(&self, dir_name: &str) -> bool {
        self.ignore.iter().any(|name| name == dir_name)
    }
}

/// `"@/*"` strips to `"@"`, but `"/*"` or `""` leave nothing to match.
fn is_blank_alias(key: &str) -> bool {
    key.trim()
        .trim_end_matches("/*")
        .trim_end_matches('/')
        .is_empty()
}

/// Values supplied on the command line. Only fields that are set take part
/// in the merge, and `entries` are appended to the configured ones.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupling_threshold: Option<usize>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<FrameworkSettings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsOverrides>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub no_color: bool,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.coupling_threshold.is_none()
            && self.entries.is_empty()
            && self.framework.is_none()
            && self.settings.is_none()
    }
}
