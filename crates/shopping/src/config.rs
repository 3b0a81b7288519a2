//! Shopping service configuration loaded from environment variables.

use std::time::Duration;

use crate::orchestrator::DEFAULT_UNIT_PRICE;

/// Shopping service configuration.
///
/// Reads from environment variables:
/// - `HOST` / `PORT`: bind address (default `0.0.0.0:8080`)
/// - `PAYMENT_URL`: ledger endpoint (default `http://localhost:8081/payments`)
/// - `PAYMENT_TIMEOUT_SECS`: bound on the ledger call (default `10`)
/// - `UNIT_PRICE`: price per item in minor units (default `10000`)
/// - `DATABASE_URL`: Postgres URL; in-memory stores are used when unset
/// - `STORE_TIMEOUT_SECS`: bound on each store call (default `5`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub payment_url: String,
    pub payment_timeout: Duration,
    pub unit_price: i64,
    pub database_url: Option<String>,
    pub store_timeout: Duration,
}

fn secs(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
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
            payment_url: std::env::var("PAYMENT_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.payment_url),
            payment_timeout: secs("PAYMENT_TIMEOUT_SECS").unwrap_or(defaults.payment_timeout),
            unit_price: std::env::var("UNIT_PRICE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|p: &i64| *p > 0)
                .unwrap_or(defaults.unit_price),
            database_url: std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            store_timeout: secs("STORE_TIMEOUT_SECS").unwrap_or(defaults.store_timeout),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            payment_url: "http://localhost:8081/payments".to_string(),
            payment_timeout: Duration::from_secs(10),
            unit_price: DEFAULT_UNIT_PRICE,
            database_url: None,
            store_timeout: Duration::from_secs(5),
        }
    }
}
