//! File-based config discovery and layered loading.
//!
//! Layers, lowest priority first:
//!
//! 1. built-in defaults
//! 2. `reach.toml` in the project root (or an explicit `--config` file)
//! 3. the `"reach"` field of `package.json`
//! 4. `REACH_*` environment variables (`__` separates nested keys)
//! 5. command-line overrides

use std::fs;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Serialized};
use serde_json::Value;

use crate::config::{ConfigOverrides, ReachConfig};
use crate::error::{ConfigError, Result};

pub const CONFIG_FILE: &str = "reach.toml";
pub const PACKAGE_FIELD: &str = "reach";
pub const ENV_PREFIX: &str = "REACH_";

/// Finds and loads reach configuration for one project root.
///
/// # Example
///
/// ```no_run
/// use reach_config::ConfigDiscovery;
///
/// let config = ConfigDiscovery::new(".").load().unwrap();
/// println!("coupling threshold: {}", config.coupling_threshold);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
    explicit: Option<PathBuf>,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            explicit: None,
        }
    }

    /// Use this file instead of `reach.toml`. It may be a TOML file, a JSON
    /// file holding the config object, or a `package.json` with a `"reach"` field.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The config file that will be read, if any.
    ///
    /// Searches in this order:
    /// 1. the explicit file
    /// 2. `reach.toml`
    /// 3. `package.json` with a non-null `"reach"` field
    pub fn find(&self) -> Option<PathBuf> {
        if let Some(explicit) = &self.explicit {
            return explicit.exists().then(|| explicit.clone());
        }

        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        match read_package_field(&pkg_path) {
            Ok(Some(_)) => Some(pkg_path),
            _ => None,
        }
    }

    /// Load with every layer except command-line overrides.
    pub fn load(&self) -> Result<ReachConfig> {
        self.load_with(&ConfigOverrides::default())
    }

    /// Load with every layer.
    ///
    /// A missing `reach.toml` is not an error; a missing explicit file is.
    pub fn load_with(&self, overrides: &ConfigOverrides) -> Result<ReachConfig> {
        let config: ReachConfig = self.figment(overrides)?.extract()?;
        config.validate()?;
        tracing::debug!(
            root = %self.root.display(),
            coupling_threshold = config.coupling_threshold,
            entries = config.entries.len(),
            aliases = config.path_aliases.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// The merged provider stack, for callers that extract their own types.
    pub fn figment(&self, overrides: &ConfigOverrides) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(ReachConfig::default()));

        match &self.explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound);
                }
                figment = figment.merge(Serialized::defaults(load_file(path)?));
            }
            None => {
                let toml_path = self.root.join(CONFIG_FILE);
                if toml_path.exists() {
                    figment = figment.merge(Serialized::defaults(load_toml(&toml_path)?));
                }

                if let Some(field) = read_package_field(&self.root.join("package.json"))? {
                    figment = figment.merge(Serialized::defaults(field));
                }
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        if !overrides.is_empty() {
            // admerge appends arrays, so --entry adds to configured entries
            figment = figment.admerge(Serialized::defaults(overrides));
        }

        Ok(figment)
    }
}

/// Discover and load config from the current directory.
pub fn discover() -> Result<ReachConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(root).load()
}

fn load_file(path: &Path) -> Result<Value> {
    if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
        return read_package_field(path)?.ok_or_else(|| ConfigError::InvalidValue {
            field: PACKAGE_FIELD.to_string(),
            hint: Some(format!(
                "Add a '{PACKAGE_FIELD}' field to {}",
                path.display()
            )),
        });
    }

    if path.extension().is_some_and(|ext| ext == "json") {
        let content = fs::read_to_string(path)?;
        return serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
            field: path.display().to_string(),
            hint: Some(format!("Invalid JSON: {e}")),
        });
    }

    load_toml(path)
}

fn load_toml(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;

    let toml_val: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::InvalidValue {
        field: path.display().to_string(),
        hint: Some(format!("Invalid TOML syntax: {e}")),
    })?;

    serde_json::to_value(toml_val).map_err(|e| ConfigError::InvalidValue {
        field: path.display().to_string(),
        hint: Some(format!("TOML to JSON conversion failed: {e}")),
    })
}

/// The `"reach"` field of a `package.json`. A missing file or field, or a
/// null field, reads as `None`.
fn read_package_field(path: &Path) -> Result<Option<Value>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let parsed: Value = serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
        field: "package.json".to_string(),
        hint: Some(format!("Invalid JSON: {e}")),
    })?;

    match parsed.get(PACKAGE_FIELD) {
        None | Some(Value::Null) => Ok(None),
        Some(field) if field.is_object() => Ok(Some(field.clone())),
        Some(_) => Err(ConfigError::InvalidValue {
            field: PACKAGE_FIELD.to_string(),
            hint: Some("The 'reach' field of package.json must be an object".to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        let discovery = ConfigDiscovery::new(dir.path());
        assert!(discovery.find().is_none());
    }

    #[test]
    fn find_skips_package_json_without_field() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "app", "reach": null }"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn load_uses_defaults_without_config() {
        let dir = TempDir::new().unwrap();
        let config = ConfigDiscovery::new(dir.path()).load().unwrap();
        assert_eq!(config, ReachConfig::default());
    }

    #[test]
    fn missing_explicit_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = ConfigDiscovery::new(dir.path())
            .with_config_file(dir.path().join("nope.toml"))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound));
    }

    #[test]
    fn invalid_toml_reports_syntax_hint() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "coupling_threshold = = 3").unwrap();
        let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
        assert!(err.to_string().contains("Invalid TOML syntax"));
    }

    #[test]
    fn non_object_package_field_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "reach": ["src"] }"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).load().is_err());
    }
}
