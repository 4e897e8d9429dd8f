//! Client configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from an
//! optional TOML file overlaid with `ASSISTA__`-prefixed environment
//! variables. Every section has defaults, so an empty source is a valid
//! configuration.

pub mod api;
pub mod logging;
pub mod routes;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::api::ApiConfig;
pub use self::logging::LoggingConfig;
pub use self::routes::{RoutesConfig, ViewConfig};
pub use self::storage::{StorageBackend, StorageConfig};

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "ASSISTA";

/// Root client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Authentication API location and login negotiation settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Session persistence settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Route table: login path, per-role homes, guarded views.
    #[serde(default)]
    pub routes: RoutesConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file (optional) and the environment.
    ///
    /// `ASSISTA__API__BASE_URL=https://...` overrides `api.base_url`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Check cross-field constraints the deserializer cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        self.api.validate()?;
        self.storage.validate()?;
        self.routes.validate()
    }
}
