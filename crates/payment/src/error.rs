//! Ledger error types with HTTP and gRPC mappings.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::ErrorBody;
use thiserror::Error;
use tonic::Status;

use crate::store::StoreError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Request input is malformed.
    #[error("{0}")]
    Validation(String),

    /// The id is not a valid payment id.
    #[error("invalid payment id: {0}")]
    InvalidId(String),

    /// No payment with this id.
    #[error("payment not found")]
    NotFound,

    /// The payment store failed.
    #[error("payment store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience type alias for ledger results.
pub type Result<T> = std::result::Result<T, LedgerError>;

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            LedgerError::Validation(_) | LedgerError::InvalidId(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            LedgerError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            LedgerError::Store(err) => {
                tracing::error!(error = %err, "payment store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody::new(status.as_u16(), message))).into_response()
    }
}

impl From<LedgerError> for Status {
    fn from(err: LedgerError) -> Self {
        match &err {
            LedgerError::Validation(_) | LedgerError::InvalidId(_) => {
                Status::invalid_argument(err.to_string())
            }
            LedgerError::NotFound => Status::not_found(err.to_string()),
            LedgerError::Store(StoreError::Timeout(_)) => {
                tracing::error!(error = %err, "payment store timed out");
                Status::unavailable("payment store unavailable")
            }
            LedgerError::Store(_) => {
                tracing::error!(error = %err, "payment store failure");
                Status::internal("internal error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tonic::Code;

    #[test]
    fn test_http_status_mapping() {
        let cases = [
            (LedgerError::Validation("email is required".into()), StatusCode::BAD_REQUEST),
            (LedgerError::InvalidId("x".into()), StatusCode::BAD_REQUEST),
            (LedgerError::NotFound, StatusCode::NOT_FOUND),
            (
                LedgerError::Store(StoreError::Timeout(Duration::from_secs(5))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_grpc_status_mapping() {
        let cases = [
            (LedgerError::Validation("email is required".into()), Code::InvalidArgument),
            (LedgerError::NotFound, Code::NotFound),
            (
                LedgerError::Store(StoreError::Timeout(Duration::from_secs(5))),
                Code::Unavailable,
            ),
            (LedgerError::Store(StoreError::Corrupt("bad".into())), Code::Internal),
        ];
        for (err, code) in cases {
            assert_eq!(Status::from(err).code(), code);
        }
    }
}
