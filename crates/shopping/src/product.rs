//! Product catalogue record.

use chrono::{DateTime, Utc};
use common::RecordId;
use serde::{Deserialize, Serialize};

use crate::error::ShoppingError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    /// Integer minor units.
    pub price: i64,
    pub stock: i64,
    pub created_at: DateTime<Utc>,
}

/// Client-supplied product fields, used for both create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub stock: i64,
}

impl ProductDraft {
    pub fn validate(&self) -> Result<(), ShoppingError> {
        if self.name.trim().is_empty() {
            return Err(ShoppingError::Validation("product name is required".into()));
        }
        if self.price <= 0 {
            return Err(ShoppingError::Validation("price must be > 0".into()));
        }
        if self.stock < 0 {
            return Err(ShoppingError::Validation("stock must be >= 0".into()));
        }
        Ok(())
    }
}

impl Product {
    pub fn from_draft(draft: ProductDraft) -> Self {
        Self {
            id: RecordId::new(),
            name: draft.name,
            price: draft.price,
            stock: draft.stock,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, price: i64, stock: i64) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            price,
            stock,
        }
    }

    #[test]
    fn test_validation_messages() {
        let cases = [
            (draft("", 100, 1), "product name is required"),
            (draft("  ", 100, 1), "product name is required"),
            (draft("Mug", 0, 1), "price must be > 0"),
            (draft("Mug", 100, -1), "stock must be >= 0"),
        ];
        for (d, message) in cases {
            assert_eq!(d.validate().unwrap_err().to_string(), message);
        }
    }

    #[test]
    fn test_zero_stock_is_valid() {
        assert!(draft("Mug", 100, 0).validate().is_ok());
    }
}
