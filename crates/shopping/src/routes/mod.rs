//! REST handlers.

pub mod health;
pub mod metrics;
pub mod products;
pub mod transactions;

use axum::extract::rejection::JsonRejection;
use serde::Serialize;

use crate::error::ShoppingError;

/// `{"message": "...", "data": ...}` acknowledgement for writes.
#[derive(Debug, Serialize)]
pub struct Ack<T: Serialize> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Ack<T> {
    pub fn with_data(message: &'static str, data: T) -> Self {
        Self {
            message,
            data: Some(data),
        }
    }
}

impl Ack<()> {
    pub fn message(message: &'static str) -> Self {
        Self {
            message,
            data: None,
        }
    }
}

pub(crate) fn bad_body(_: JsonRejection) -> ShoppingError {
    ShoppingError::Validation("invalid request body".to_string())
}
