//! Identity service error types.

use thiserror::Error;
use token::TokenError;

use crate::store::StoreError;

/// Errors that can occur during identity operations.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Registration input is malformed.
    #[error("{0}")]
    Validation(String),

    /// A user with this email already exists.
    #[error("email already registered")]
    AlreadyRegistered,

    /// Unknown email or wrong password; deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Token failed verification.
    #[error("invalid token")]
    InvalidToken,

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Signing a token failed.
    #[error("token error: {0}")]
    Token(TokenError),

    /// The user store failed.
    #[error("user store error: {0}")]
    Store(#[from] StoreError),
}

impl From<TokenError> for IdentityError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => IdentityError::InvalidToken,
            other => IdentityError::Token(other),
        }
    }
}

/// Convenience type alias for identity results.
pub type Result<T> = std::result::Result<T, IdentityError>;
