//! REST handlers.

pub mod health;
pub mod identity;
pub mod metrics;
pub mod payments;
pub mod shopping;

use axum::extract::rejection::JsonRejection;

use crate::error::GatewayError;

pub(crate) fn bad_body(_: JsonRejection) -> GatewayError {
    GatewayError::BadRequest("invalid request body".to_string())
}
