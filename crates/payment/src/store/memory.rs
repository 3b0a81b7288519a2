use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::RecordId;
use tokio::sync::RwLock;

use super::{PaymentStore, StoreError};
use crate::payment::Payment;

/// In-memory payment store for tests and local runs.
#[derive(Clone, Default)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<HashMap<RecordId, Payment>>>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored payments.
    pub async fn payment_count(&self) -> usize {
        self.payments.read().await.len()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn insert(&self, payment: &Payment) -> Result<(), StoreError> {
        self.payments
            .write()
            .await
            .insert(payment.id, payment.clone());
        Ok(())
    }

    async fn get(&self, id: RecordId) -> Result<Option<Payment>, StoreError> {
        Ok(self.payments.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: RecordId) -> Result<Option<Payment>, StoreError> {
        Ok(self.payments.write().await.remove(&id))
    }

    async fn list(&self) -> Result<Vec<Payment>, StoreError> {
        let mut all: Vec<Payment> = self.payments.read().await.values().cloned().collect();
        all.sort_by_key(|p| p.created_at);
        Ok(all)
    }
}
