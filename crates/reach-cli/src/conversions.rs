//! Conversions from loaded configuration and arguments to analyzer types.

use reach_analysis::{AnalyzerConfig, FrameworkConfig, FrameworkKind};
use reach_config::{ConfigOverrides, FrameworkSettings, ReachConfig, SettingsOverrides};

use crate::cli::{AnalyzeArgs, GlobalFlags};

/// Framework settings as the analyzer's [`FrameworkConfig`].
///
/// Known names get their canonical name and default convention directories.
/// Any other name yields a generic framework driven by its alias map.
pub fn framework_config(settings: &FrameworkSettings) -> FrameworkConfig {
    let kind = FrameworkKind::from_name(&settings.name);
    let mut config = FrameworkConfig::for_kind(kind);
    if kind == FrameworkKind::Generic {
        config.name = settings.name.clone();
    }
    if !settings.convention_directories.is_empty() {
        config = config.with_convention_directories(settings.convention_directories.iter().cloned());
    }
    if let Some(aliases) = &settings.alias_map {
        config = config.with_alias_map(aliases.clone());
    }
    config
}

pub fn analyzer_config(config: &ReachConfig) -> AnalyzerConfig {
    AnalyzerConfig {
        coupling_threshold: config.coupling_threshold,
        path_aliases: config.path_aliases.clone(),
        entries: config.entries.clone(),
        framework: config.framework.as_ref().map(framework_config),
    }
}

/// The values given on the command line, as the top configuration layer.
pub fn overrides(args: &AnalyzeArgs, globals: GlobalFlags) -> ConfigOverrides {
    ConfigOverrides {
        coupling_threshold: args.threshold,
        entries: args.entries.clone(),
        framework: args.framework.as_deref().map(FrameworkSettings::named),
        settings: globals.no_color.then(|| SettingsOverrides {
            log_level: None,
            no_color: true,
        }),
    }
}
