//! Identity token service.
//!
//! Tokens are HMAC-signed JWTs carrying `{id, name, email}` and an expiry.
//! The service is stateless: there is no revocation list, a token simply
//! stops verifying once `exp` has passed.

pub mod error;
pub mod service;

pub use error::TokenError;
pub use service::{DEFAULT_TTL_SECS, TokenClaims, TokenService};

/// Signing secret used when none is configured. Development only.
pub const DEVELOPMENT_SECRET: &str = "development-only-insecure-secret";
