//! Shopping service error types with HTTP response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::{ErrorBody, RecordId};
use thiserror::Error;

use crate::payment_client::PaymentGatewayError;
use crate::store::StoreError;

/// Errors that can occur during catalogue and order operations.
#[derive(Debug, Error)]
pub enum ShoppingError {
    /// Request input is malformed. Raised before any outbound call.
    #[error("{0}")]
    Validation(String),

    /// The path id is not a valid record id.
    #[error("invalid {0} id")]
    InvalidId(&'static str),

    /// No record with this id.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The ledger answered but did not accept the payment. The failed order
    /// has been persisted under `transaction_id`.
    #[error("payment failed")]
    PaymentFailed { transaction_id: RecordId },

    /// The ledger call did not complete; nothing was persisted.
    #[error("payment service not reachable")]
    PaymentRequest(#[source] PaymentGatewayError),

    /// The store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience type alias for shopping results.
pub type Result<T> = std::result::Result<T, ShoppingError>;

impl IntoResponse for ShoppingError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ShoppingError::Validation(_) | ShoppingError::InvalidId(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ShoppingError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ShoppingError::PaymentFailed { transaction_id } => (
                StatusCode::PAYMENT_REQUIRED,
                format!("payment failed (transaction {transaction_id})"),
            ),
            ShoppingError::PaymentRequest(source) => {
                tracing::warn!(error = %source, "payment service not reachable");
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            ShoppingError::Store(err) => {
                tracing::error!(error = %err, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody::new(status.as_u16(), message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ShoppingError::Validation("quantity must be > 0".into()), StatusCode::BAD_REQUEST),
            (ShoppingError::InvalidId("transaction"), StatusCode::BAD_REQUEST),
            (ShoppingError::NotFound("transaction"), StatusCode::NOT_FOUND),
            (
                ShoppingError::PaymentFailed {
                    transaction_id: RecordId::new(),
                },
                StatusCode::PAYMENT_REQUIRED,
            ),
            (
                ShoppingError::PaymentRequest(PaymentGatewayError::Timeout),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ShoppingError::Store(StoreError::Corrupt("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ShoppingError::InvalidId("transaction").to_string(),
            "invalid transaction id"
        );
        assert_eq!(
            ShoppingError::NotFound("product").to_string(),
            "product not found"
        );
    }
}
