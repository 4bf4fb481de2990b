//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `STEWARD_*` variable could not be merged or extracted.
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A value parsed but is outside what the workflow accepts.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        Self::Figment(Box::new(error))
    }
}
