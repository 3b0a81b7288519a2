//! Product and order persistence.

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use common::RecordId;
use thiserror::Error;

use crate::product::Product;
use crate::transaction::Transaction;

pub use memory::{InMemoryOrderStore, InMemoryProductStore};
pub use postgres::{PostgresOrderStore, PostgresProductStore, run_migrations};

/// Errors that can occur when interacting with a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("corrupt row: {0}")]
    Corrupt(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Storage capability for catalogue products.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, product: &Product) -> Result<(), StoreError>;

    async fn get(&self, id: RecordId) -> Result<Option<Product>, StoreError>;

    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// Replaces a stored product. Returns false if it does not exist.
    async fn update(&self, product: &Product) -> Result<bool, StoreError>;

    /// Returns false if the product did not exist.
    async fn delete(&self, id: RecordId) -> Result<bool, StoreError>;
}

/// Storage capability for order records.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert(&self, transaction: &Transaction) -> Result<(), StoreError>;

    async fn get(&self, id: RecordId) -> Result<Option<Transaction>, StoreError>;

    /// All orders, oldest first.
    async fn list(&self) -> Result<Vec<Transaction>, StoreError>;

    /// Replaces a stored order. Returns false if it does not exist.
    async fn update(&self, transaction: &Transaction) -> Result<bool, StoreError>;

    /// Returns false if the order did not exist.
    async fn delete(&self, id: RecordId) -> Result<bool, StoreError>;
}
