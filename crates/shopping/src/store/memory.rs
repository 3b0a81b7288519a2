use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::RecordId;
use tokio::sync::RwLock;

use super::{OrderStore, ProductStore, StoreError};
use crate::product::Product;
use crate::transaction::Transaction;

/// In-memory product store.
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<HashMap<RecordId, Product>>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: &Product) -> Result<(), StoreError> {
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(())
    }

    async fn get(&self, id: RecordId) -> Result<Option<Product>, StoreError> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let mut all: Vec<Product> = self.products.read().await.values().cloned().collect();
        all.sort_by_key(|p| p.created_at);
        Ok(all)
    }

    async fn update(&self, product: &Product) -> Result<bool, StoreError> {
        let mut products = self.products.write().await;
        match products.get_mut(&product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        Ok(self.products.write().await.remove(&id).is_some())
    }
}

/// In-memory order store.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<RecordId, Transaction>>>,
    fail_on_insert: Arc<std::sync::atomic::AtomicBool>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent inserts fail, to exercise persistence errors.
    pub fn set_fail_on_insert(&self, fail: bool) {
        self.fail_on_insert
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, transaction: &Transaction) -> Result<(), StoreError> {
        if self.fail_on_insert.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(StoreError::Corrupt("insert rejected".to_string()));
        }
        self.orders
            .write()
            .await
            .insert(transaction.id, transaction.clone());
        Ok(())
    }

    async fn get(&self, id: RecordId) -> Result<Option<Transaction>, StoreError> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Transaction>, StoreError> {
        let mut all: Vec<Transaction> = self.orders.read().await.values().cloned().collect();
        all.sort_by_key(|t| t.created_at);
        Ok(all)
    }

    async fn update(&self, transaction: &Transaction) -> Result<bool, StoreError> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(&transaction.id) {
            Some(existing) => {
                *existing = transaction.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        Ok(self.orders.write().await.remove(&id).is_some())
    }
}
