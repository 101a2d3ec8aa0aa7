//! Layered configuration for the reach analyzer.
//!
//! [`ReachConfig`] holds everything a run needs besides the files themselves:
//! the coupling threshold, extra entry points, custom path aliases, an explicit
//! framework and the directories the CLI walker skips. [`ConfigDiscovery`]
//! merges defaults, `reach.toml`, the `package.json` `"reach"` field,
//! `REACH_*` environment variables and command-line overrides.

pub mod config;
pub mod discovery;
pub mod error;
pub mod settings;

pub use config::*;
pub use error::*;
pub use settings::*;

pub use discovery::{CONFIG_FILE, ConfigDiscovery, ENV_PREFIX, PACKAGE_FIELD, discover};
