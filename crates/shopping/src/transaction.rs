//! Order (transaction) record and its status.

use chrono::{DateTime, Utc};
use common::{RecordId, has_email_marker};
use serde::{Deserialize, Serialize};

use crate::error::ShoppingError;

/// Outcome recorded for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Success => "success",
            TransactionStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(TransactionStatus::Success),
            "failed" => Ok(TransactionStatus::Failed),
            other => Err(format!("unknown transaction status: {other}")),
        }
    }
}

/// A persisted order.
///
/// `total` is always computed server side. A `Success` record always carries
/// a payment id; a `Failed` one never does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: RecordId,
    pub product_id: String,
    pub payment_id: Option<String>,
    pub email: String,
    pub quantity: i64,
    pub total: i64,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

/// Client-supplied order fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub quantity: i64,
}

impl OrderRequest {
    pub fn new(email: impl Into<String>, product_id: impl Into<String>, quantity: i64) -> Self {
        Self {
            email: email.into(),
            product_id: product_id.into(),
            quantity,
        }
    }

    /// Checks the request and prices it at `unit_price` per item.
    pub fn validate_and_price(&self, unit_price: i64) -> Result<i64, ShoppingError> {
        if !has_email_marker(&self.email) {
            return Err(ShoppingError::Validation("invalid email format".into()));
        }
        if self.product_id.trim().is_empty() {
            return Err(ShoppingError::Validation("product_id is required".into()));
        }
        if self.quantity <= 0 {
            return Err(ShoppingError::Validation("quantity must be > 0".into()));
        }
        self.quantity
            .checked_mul(unit_price)
            .ok_or_else(|| ShoppingError::Validation("order total is too large".into()))
    }
}
