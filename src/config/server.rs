//! Server configuration

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

/// Listener, environment and transport settings.
///
/// Every field has a default, so the section may be omitted entirely.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set
    pub log_level: String,
    /// Per-request timeout, 1 to 300 seconds
    pub request_timeout_secs: u64,
    /// Comma-separated allowed origins; any origin when unset
    pub cors_origins: Option<String>,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ValidationError::InvalidBindAddress(addr))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Allowed CORS origins, blanks dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=300).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: Environment::Development,
            log_level: "info,account_service=debug,sqlx=warn,tower_http=info".to_string(),
            request_timeout_secs: 30,
            cors_origins: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn socket_addr_joins_host_and_port() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 4000,
            ..Default::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:4000");
    }

    #[test]
    fn unparseable_host_is_rejected() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidBindAddress(_))
        ));
    }

    #[test]
    fn production_flag() {
        let mut config = ServerConfig::default();
        assert!(!config.is_production());

        config.environment = Environment::Production;
        assert!(config.is_production());
    }

    #[test]
    fn cors_origins_drop_blanks() {
        let config = ServerConfig {
            cors_origins: Some("http://localhost:5173, https://app.example.com,".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.cors_origins_list(),
            vec!["http://localhost:5173", "https://app.example.com"]
        );
    }

    #[test]
    fn timeout_out_of_range() {
        for secs in [0, 500] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
        }
    }
}
