//! Logging setup for the reach CLI.
//!
//! Logs go to stderr so stdout carries only the report.
//!
//! The filter is chosen in this order:
//! 1. `--verbose`: DEBUG for reach crates
//! 2. `--quiet`: ERROR only
//! 3. `RUST_LOG`
//! 4. `settings.log_level` from the configuration
//! 5. INFO for reach crates

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const REACH_CRATES: &[&str] = &["reach_analysis", "reach_graph", "reach_config", "reach_cli"];

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub verbose: bool,
    pub quiet: bool,
    pub no_color: bool,
    /// Level from the configuration, e.g. `"debug"` or `"warn"`.
    pub level: Option<String>,
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logger(options: &LogOptions) {
    let filter = build_filter(options);

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!options.no_color)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

pub fn build_filter(options: &LogOptions) -> EnvFilter {
    if options.verbose {
        return EnvFilter::new(crate_directives("debug"));
    }
    if options.quiet {
        return EnvFilter::new("error");
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = options.level.as_deref().unwrap_or("info");
    EnvFilter::try_new(crate_directives(level))
        .unwrap_or_else(|_| EnvFilter::new(crate_directives("info")))
}

/// `"reach_analysis=LEVEL,reach_graph=LEVEL,..."`
pub fn crate_directives(level: &str) -> String {
    REACH_CRATES
        .iter()
        .map(|name| format!("{name}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Whether colored output should be used, honoring `NO_COLOR` and `FORCE_COLOR`.
pub fn should_use_colors(no_color: bool) -> bool {
    if no_color || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stdout().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_directives() {
        assert_eq!(
            crate_directives("warn"),
            "reach_analysis=warn,reach_graph=warn,reach_config=warn,reach_cli=warn"
        );
    }

    #[test]
    fn test_verbose_filter() {
        let filter = build_filter(&LogOptions {
            verbose: true,
            ..LogOptions::default()
        });
        assert!(filter.to_string().contains("reach_analysis=debug"));
    }

    #[test]
    fn test_quiet_filter() {
        let filter = build_filter(&LogOptions {
            quiet: true,
            ..LogOptions::default()
        });
        assert!(filter.to_string().contains("error"));
    }

    #[test]
    fn test_no_color_flag_wins() {
        assert!(!should_use_colors(true));
    }
}
