//! Token error types.

use thiserror::Error;

/// Errors produced by the token service.
///
/// Verification failures collapse into a single variant so callers cannot
/// tell an expired token from a forged one.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token is malformed, unsigned, wrongly signed, uses a non-HMAC
    /// algorithm, is missing claims, or has expired.
    #[error("invalid token")]
    Invalid,

    /// Signing a freshly built claim set failed.
    #[error("failed to sign token: {0}")]
    Signing(String),
}
