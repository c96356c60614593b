//! # System Constants
//!
//! Fixed labels, event codes and environment keys shared across the registry,
//! the record stores and the configuration loader.

/// Backend identification and environment keys
pub mod system {
    /// Human-readable label returned by `StoreRegistry::identify`
    pub const BACKEND_NAME: &str = "Memory record store";

    /// Prefix for configuration environment variables (`RMS_*`)
    pub const ENV_PREFIX: &str = "RMS";

    /// Environment variable selecting the log output format
    pub const LOG_FORMAT_VAR: &str = "RMS_LOG_FORMAT";

    /// Environment used when nothing else is configured
    pub const DEFAULT_ENVIRONMENT: &str = "development";

    /// First record id handed out by a fresh record store
    pub const FIRST_RECORD_ID: u32 = 1;
}

/// Integer codes carried by listener notifications
pub mod events {
    pub const RECORD_ADDED: i32 = 1;
    pub const RECORD_CHANGED: i32 = 3;
    pub const RECORD_DELETED: i32 = 4;

    pub const STORE_CREATED: i32 = 8;
    pub const STORE_CLOSED: i32 = 9;
    pub const STORE_DELETED: i32 = 10;
}
