//! Identity service configuration loaded from environment variables.

use std::time::Duration;

/// Identity service configuration.
///
/// Reads from environment variables:
/// - `HOST` / `PORT`: gRPC bind address (default `0.0.0.0:50052`)
/// - `JWT_SECRET`: token signing secret (development secret when unset)
/// - `TOKEN_TTL_SECS`: token lifetime (default `3600`)
/// - `DATABASE_URL`: Postgres URL; the in-memory store is used when unset
/// - `STORE_TIMEOUT_SECS`: bound on each store call (default `5`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub database_url: Option<String>,
    pub store_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            jwt_secret: std::env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            token_ttl_secs: std::env::var("TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.token_ttl_secs),
            database_url: std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            store_timeout: std::env::var("STORE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.store_timeout),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// True when the built-in development secret is in use.
    pub fn uses_development_secret(&self) -> bool {
        self.jwt_secret == token::DEVELOPMENT_SECRET
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 50052,
            jwt_secret: token::DEVELOPMENT_SECRET.to_string(),
            token_ttl_secs: token::DEFAULT_TTL_SECS,
            database_url: None,
            store_timeout: Duration::from_secs(5),
        }
    }
}
