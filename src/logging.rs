//! # Structured Logging Module
//!
//! Environment-aware structured logging for hosts embedding the registry.
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the host, which may call [`init_structured_logging`].

use crate::config::RegistryConfig;
use crate::constants::system::LOG_FORMAT_VAR;
use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize console logging with a filter derived from `config.environment`
///
/// `RUST_LOG` wins over the environment default when set. Safe to call more
/// than once; only the first call's configuration takes effect, and a
/// subscriber installed elsewhere is left in place.
pub fn init_structured_logging(config: &RegistryConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = config.environment.as_str();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(get_log_level(environment)));

        let layer = if use_json_output() {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(true)
                .with_filter(filter)
                .boxed()
        };

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            environment = %environment,
            pid = std::process::id(),
            "🔧 STRUCTURED LOGGING: Initialized"
        );
    });
}

fn use_json_output() -> bool {
    std::env::var(LOG_FORMAT_VAR)
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        "test" | "development" => "debug",
        _ => "debug",
    }
}

/// Log structured data for registry lifecycle operations
pub fn log_registry_operation(operation: &str, name: &str, status: &str, details: Option<&str>) {
    tracing::info!(
        operation = %operation,
        name = %name,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "📚 REGISTRY_OPERATION"
    );
}

/// Log structured data for record-level store operations
pub fn log_store_operation(
    operation: &str,
    store: &str,
    record_id: Option<u32>,
    status: &str,
    details: Option<&str>,
) {
    tracing::debug!(
        operation = %operation,
        store = %store,
        record_id = record_id,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "💾 STORE_OPERATION"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(get_log_level("test"), "debug");
        assert_eq!(get_log_level("development"), "debug");
        assert_eq!(get_log_level("production"), "info");
        assert_eq!(get_log_level("unknown"), "debug");
    }

    #[test]
    fn test_log_level_follows_configured_environment() {
        let production = RegistryConfig {
            environment: "production".to_string(),
            ..RegistryConfig::default()
        };
        assert_eq!(get_log_level(&production.environment), "info");
        assert_eq!(get_log_level(&RegistryConfig::default().environment), "debug");
    }

    #[test]
    fn test_init_is_idempotent() {
        let config = RegistryConfig::default();
        init_structured_logging(&config);
        init_structured_logging(&config);
        log_registry_operation("open", "scores", "created", None);
        log_store_operation("add_record", "scores", Some(1), "ok", None);
    }
}
