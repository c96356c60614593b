//! # Registry Configuration
//!
//! Layered configuration for the record store registry: built-in defaults, an
//! optional file (TOML, YAML or JSON, chosen by extension), then `RMS_*`
//! environment variables.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rms_memstore::config::RegistryConfig;
//! use rms_memstore::StoreRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RegistryConfig::load()?;
//! let registry: StoreRegistry = StoreRegistry::from_config(&config);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use crate::constants::system::DEFAULT_ENVIRONMENT;
use serde::{Deserialize, Serialize};

pub use error::{ConfigResult, ConfigurationError};

/// Settings consumed by [`StoreRegistry::from_config`](crate::StoreRegistry::from_config)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Runtime environment name, also selects the default log level
    pub environment: String,

    /// Report this many free bytes instead of sampling system memory
    pub fixed_free_memory_bytes: Option<u64>,

    /// Forward record-level events from stores to the listener
    pub record_events: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            fixed_free_memory_bytes: None,
            record_events: true,
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.environment.trim().is_empty() {
            return Err(ConfigurationError::invalid_value(
                "environment",
                "must not be empty",
            ));
        }
        Ok(())
    }
}
