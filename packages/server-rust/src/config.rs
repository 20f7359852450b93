//! Process configuration.
//!
//! [`Cli`] parses flags (with environment fallbacks) and converts into
//! [`ServerConfig`], which the rest of the server consumes.

use std::time::Duration;

use clap::Parser;

use crate::network::NetworkConfig;
use crate::telemetry::LogConfig;

/// Server-level configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub network: NetworkConfig,
    pub log: LogConfig,
    /// Name returned by `GET /customer/info/{nic}`, which has no name input.
    pub default_customer_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            log: LogConfig::default(),
            default_customer_name: "yasiya".to_string(),
        }
    }
}

/// Command-line interface of the `aspectkit-server` binary.
#[derive(Debug, Parser)]
#[command(name = "aspectkit-server", version, about = "Customer and SMS endpoints with execution-time logging")]
pub struct Cli {
    /// Bind address.
    #[arg(long, env = "ASPECTKIT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Listen port (0 = OS-assigned).
    #[arg(long, env = "ASPECTKIT_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Log filter directives, e.g. `info` or `aspectkit_core=debug`.
    #[arg(long, env = "ASPECTKIT_LOG", default_value = "info")]
    pub log_level: String,

    /// Emit JSON log lines.
    #[arg(long, env = "ASPECTKIT_LOG_JSON")]
    pub log_json: bool,

    /// Per-request timeout in seconds.
    #[arg(long, env = "ASPECTKIT_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Allowed CORS origin; repeat for several. Defaults to any origin.
    #[arg(long = "cors-origin", env = "ASPECTKIT_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Name used when a customer lookup supplies none.
    #[arg(long, env = "ASPECTKIT_DEFAULT_CUSTOMER_NAME", default_value = "yasiya")]
    pub default_customer_name: String,
}

impl Cli {
    #[must_use]
    pub fn into_config(self) -> ServerConfig {
        let cors_origins = if self.cors_origins.is_empty() {
            vec!["*".to_string()]
        } else {
            self.cors_origins
        };
        ServerConfig {
            network: NetworkConfig {
                host: self.host,
                port: self.port,
                cors_origins,
                request_timeout: Duration::from_secs(self.request_timeout_secs),
            },
            log: LogConfig {
                level: self.log_level,
                json: self.log_json,
            },
            default_customer_name: self.default_customer_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_server_config_defaults() {
        let config = Cli::try_parse_from(["aspectkit-server"]).unwrap().into_config();
        let defaults = ServerConfig::default();
        assert_eq!(config.network.host, defaults.network.host);
        assert_eq!(config.network.port, defaults.network.port);
        assert_eq!(config.network.cors_origins, vec!["*"]);
        assert_eq!(config.network.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log.level, "info");
        assert!(!config.log.json);
        assert_eq!(config.default_customer_name, "yasiya");
    }

    #[test]
    fn cli_flags_override_defaults() {
        let config = Cli::try_parse_from([
            "aspectkit-server",
            "--host",
            "127.0.0.1",
            "--port",
            "0",
            "--log-level",
            "debug",
            "--log-json",
            "--request-timeout-secs",
            "5",
            "--cors-origin",
            "http://localhost:3000,https://example.com",
            "--default-customer-name",
            "kamal",
        ])
        .unwrap()
        .into_config();

        assert_eq!(config.network.host, "127.0.0.1");
        assert_eq!(config.network.port, 0);
        assert_eq!(
            config.network.cors_origins,
            vec!["http://localhost:3000", "https://example.com"]
        );
        assert_eq!(config.network.request_timeout, Duration::from_secs(5));
        assert_eq!(config.log.level, "debug");
        assert!(config.log.json);
        assert_eq!(config.default_customer_name, "kamal");
    }

    #[test]
    fn cli_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["aspectkit-server", "--port", "70000"]).is_err());
    }
}
