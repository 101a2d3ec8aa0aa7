//! Global settings that affect presentation rather than analysis.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset, e.g. `"debug"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    #[serde(default)]
    pub no_color: bool,
}
