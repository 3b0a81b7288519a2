//! Payment ledger configuration loaded from environment variables.

use std::time::Duration;

/// Ledger configuration.
///
/// Reads from environment variables:
/// - `HOST`: bind host for both listeners (default `0.0.0.0`)
/// - `GRPC_PORT`: gRPC port (default `50051`)
/// - `HTTP_PORT`: REST port (default `8081`)
/// - `DATABASE_URL`: Postgres URL; the in-memory store is used when unset
/// - `STORE_TIMEOUT_SECS`: bound on each store call (default `5`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub grpc_port: u16,
    pub http_port: u16,
    pub database_url: Option<String>,
    pub store_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            grpc_port: std::env::var("GRPC_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.grpc_port),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.http_port),
            database_url: std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            store_timeout: std::env::var("STORE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.store_timeout),
        }
    }

    pub fn grpc_addr(&self) -> String {
        format!("{}:{}", self.host, self.grpc_port)
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            grpc_port: 50051,
            http_port: 8081,
            database_url: None,
            store_timeout: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.grpc_addr(), "0.0.0.0:50051");
        assert_eq!(config.http_addr(), "0.0.0.0:8081");
        assert!(config.database_url.is_none());
    }
}
