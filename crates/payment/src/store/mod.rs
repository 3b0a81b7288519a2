//! Payment persistence.

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use common::RecordId;
use thiserror::Error;

use crate::payment::Payment;

pub use memory::InMemoryPaymentStore;
pub use postgres::PostgresPaymentStore;

/// Errors that can occur when interacting with the payment store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("corrupt payment row: {0}")]
    Corrupt(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Storage capability for payment records.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn insert(&self, payment: &Payment) -> Result<(), StoreError>;

    async fn get(&self, id: RecordId) -> Result<Option<Payment>, StoreError>;

    /// Removes a payment, returning the record as it was stored.
    async fn delete(&self, id: RecordId) -> Result<Option<Payment>, StoreError>;

    /// All payments, oldest first.
    async fn list(&self) -> Result<Vec<Payment>, StoreError>;
}
