//! Error types for configuration loading and validation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config not found")]
    NotFound,

    #[error("invalid config value for '{field}'{}", format_hint(.hint))]
    InvalidValue { field: String, hint: Option<String> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A layer could not be merged or extracted.
    #[error("configuration error: {0}")]
    Figment(String),
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            hint: Some(hint.into()),
        }
    }
}

fn format_hint(hint: &Option<String>) -> String {
    hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default()
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(err.to_string())
    }
}
