//! Configuration Loader
//!
//! Merges defaults, an optional configuration file and environment variables
//! into a validated [`RegistryConfig`].

use super::error::ConfigResult;
use super::RegistryConfig;
use crate::constants::system::ENV_PREFIX;
use config::{Config, Environment, File};
use std::path::Path;
use tracing::debug;

impl RegistryConfig {
    /// Load configuration from defaults and `RMS_*` environment variables
    pub fn load() -> ConfigResult<Self> {
        Self::load_from_sources(None, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load configuration from a file, with `RMS_*` environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::load_from_sources(Some(path.as_ref()), Environment::with_prefix(ENV_PREFIX))
    }

    pub(crate) fn load_from_sources(
        file: Option<&Path>,
        environment: Environment,
    ) -> ConfigResult<Self> {
        let mut builder = Config::builder();

        if let Some(path) = file {
            debug!("Loading registry configuration from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(environment.try_parsing(true))
            .build()?;

        let config: RegistryConfig = settings.try_deserialize()?;
        config.validate()?;

        debug!(
            "Registry configuration loaded: {}",
            serde_json::to_string(&config).unwrap_or_else(|_| "[serialization error]".to_string())
        );

        Ok(config)
    }
}
