//! Entry points: files considered live by definition.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a file is considered an entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntrySource {
    /// `main`, `module` or `browser` field of the manifest.
    ManifestMain,
    /// A `bin` field value.
    ManifestBin,
    /// A file referenced from a `scripts` command.
    ManifestScript,
    /// A string leaf of the `exports` field.
    ManifestExport,
    /// A routing-convention page, layout or component entry.
    FrameworkPage,
    /// A routing-convention API or server route.
    FrameworkApi,
    /// A framework configuration or hook file (`next.config.js`, `middleware.ts`).
    FrameworkConfig,
    /// Declared explicitly in the analysis configuration.
    Configured,
}

impl EntrySource {
    /// Stable tag used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManifestMain => "manifest-main",
            Self::ManifestBin => "manifest-bin",
            Self::ManifestScript => "manifest-script",
            Self::ManifestExport => "manifest-export",
            Self::FrameworkPage => "framework-page",
            Self::FrameworkApi => "framework-api",
            Self::FrameworkConfig => "framework-config",
            Self::Configured => "configured",
        }
    }

    /// Returns true for tags contributed by a manifest.
    pub fn is_manifest(&self) -> bool {
        matches!(
            self,
            Self::ManifestMain | Self::ManifestBin | Self::ManifestScript | Self::ManifestExport
        )
    }

    /// Returns true for tags contributed by a framework analyzer.
    pub fn is_framework(&self) -> bool {
        matches!(
            self,
            Self::FrameworkPage | Self::FrameworkApi | Self::FrameworkConfig
        )
    }
}

impl fmt::Display for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file treated as live regardless of whether anything imports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryPoint {
    pub path: String,
    pub source: EntrySource,
}

impl EntryPoint {
    pub fn new(path: impl Into<String>, source: EntrySource) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_source_tags() {
        assert_eq!(EntrySource::ManifestMain.as_str(), "manifest-main");
        assert_eq!(EntrySource::FrameworkConfig.to_string(), "framework-config");
        assert!(EntrySource::ManifestBin.is_manifest());
        assert!(!EntrySource::ManifestBin.is_framework());
        assert!(EntrySource::FrameworkApi.is_framework());
        assert!(!EntrySource::Configured.is_manifest());
    }

    #[test]
    fn test_entry_source_serializes_as_tag() {
        let json = serde_json::to_string(&EntrySource::ManifestExport).unwrap();
        assert_eq!(json, "\"manifest-export\"");
    }
}
