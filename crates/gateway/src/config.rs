//! Gateway configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

/// How the gateway checks bearer tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// In-process with the shared signing secret.
    #[default]
    Local,
    /// By calling the identity service's `VerifyToken`.
    Remote,
}

impl FromStr for AuthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(AuthMode::Local),
            "remote" => Ok(AuthMode::Remote),
            other => Err(format!("unknown auth mode: {other}")),
        }
    }
}

/// Gateway configuration.
///
/// Reads from environment variables:
/// - `GATEWAY_HOST` / `GATEWAY_PORT`: bind address (default `0.0.0.0:8082`)
/// - `AUTH_SERVICE_ADDR`: identity RPC endpoint (default `http://localhost:50052`)
/// - `PAYMENT_SERVICE_GRPC_ADDR`: ledger RPC endpoint (default `http://localhost:50051`)
/// - `SHOPPING_SERVICE_URL`: shopping base URL (default `http://localhost:8080`)
/// - `JWT_SECRET`: signing secret for local verification
/// - `AUTH_MODE`: `local` or `remote` (default `local`)
/// - `UPSTREAM_TIMEOUT_SECS`: bound on every outbound call (default `5`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub identity_addr: String,
    pub payment_addr: String,
    pub shopping_url: String,
    pub jwt_secret: String,
    pub auth_mode: AuthMode,
    pub upstream_timeout: Duration,
}

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: non_empty("GATEWAY_HOST").unwrap_or(defaults.host),
            port: std::env::var("GATEWAY_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            identity_addr: non_empty("AUTH_SERVICE_ADDR").unwrap_or(defaults.identity_addr),
            payment_addr: non_empty("PAYMENT_SERVICE_GRPC_ADDR").unwrap_or(defaults.payment_addr),
            shopping_url: non_empty("SHOPPING_SERVICE_URL").unwrap_or(defaults.shopping_url),
            jwt_secret: non_empty("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            auth_mode: match non_empty("AUTH_MODE").map(|v| v.parse::<AuthMode>()) {
                Some(Ok(mode)) => mode,
                Some(Err(err)) => {
                    tracing::warn!(%err, "falling back to local token verification");
                    defaults.auth_mode
                }
                None => defaults.auth_mode,
            },
            upstream_timeout: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.upstream_timeout),
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
            port: 8082,
            identity_addr: "http://localhost:50052".to_string(),
            payment_addr: "http://localhost:50051".to_string(),
            shopping_url: "http://localhost:8080".to_string(),
            jwt_secret: token::DEVELOPMENT_SECRET.to_string(),
            auth_mode: AuthMode::Local,
            upstream_timeout: Duration::from_secs(5),
        }
    }
}
