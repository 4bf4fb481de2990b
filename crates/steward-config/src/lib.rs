//! # steward-config
//!
//! Layered configuration loading for Steward using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`STEWARD_*` prefix, `__` as separator)
//! 2. Project-level `.steward/config.toml`
//! 3. User-level `~/.config/steward/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `STEWARD_RESOLUTION__MIN_EVIDENCE` -> `resolution.min_evidence`.
//!
//! ```no_run
//! use steward_config::StewardConfig;
//!
//! let config = StewardConfig::load_with_dotenv().expect("config");
//! println!("{} chars minimum", config.resolution.min_description_chars);
//! ```

mod error;
mod general;

pub use error::ConfigError;
pub use general::{GeneralConfig, OUTPUT_FORMATS};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use steward_core::entities::ResolutionRules;

pub const ENV_PREFIX: &str = "STEWARD_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StewardConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub resolution: ResolutionRules,
}

impl StewardConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] if a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the workspace root.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".steward/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values the workflow cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution.min_description_chars == 0 {
            return Err(ConfigError::InvalidValue {
                field: "resolution.min_description_chars".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.general.has_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "general.default_format".to_string(),
                reason: format!(
                    "expected one of {}, got '{}'",
                    OUTPUT_FORMATS.join(", "),
                    self.general.default_format
                ),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("steward").join("config.toml"))
    }

    /// Walks up from `CARGO_MANIFEST_DIR` looking for `.env`, then falls back
    /// to the current directory. Missing files are ignored.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
