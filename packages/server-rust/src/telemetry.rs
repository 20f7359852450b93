//! Structured logging setup.
//!
//! One global `tracing` subscriber: JSON lines for production, the
//! human-readable formatter otherwise. The filter accepts `EnvFilter` syntax,
//! e.g. `info` or `aspectkit_core=debug,tower_http=warn`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directives in `EnvFilter` syntax.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter `{filter}`: {reason}")]
    InvalidFilter { filter: String, reason: String },
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Parses filter directives.
///
/// # Errors
///
/// Returns `TelemetryError::InvalidFilter` if any directive does not parse.
pub fn build_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(level).map_err(|e| TelemetryError::InvalidFilter {
        filter: level.to_string(),
        reason: e.to_string(),
    })
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a global subscriber is
/// already set.
pub fn init_logging(config: &LogConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(&config.level)?;

    let fmt_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_filter(filter)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_filter(filter)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_info_text() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json);
    }

    #[test]
    fn accepts_per_target_directives() {
        assert!(build_filter("info").is_ok());
        assert!(build_filter("aspectkit_core=debug,tower_http=warn").is_ok());
    }

    #[test]
    fn rejects_unknown_level() {
        let err = build_filter("aspectkit_core=loudest").unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidFilter { .. }));
    }

    #[test]
    fn second_init_fails() {
        // Another test may have installed the subscriber first; either way a
        // second call must not succeed.
        let _ = init_logging(&LogConfig::default());
        assert!(matches!(
            init_logging(&LogConfig::default()),
            Err(TelemetryError::AlreadyInitialized(_))
        ));
    }
}
