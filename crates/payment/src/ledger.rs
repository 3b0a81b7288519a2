//! Payment ledger operations.

use std::sync::Arc;

use common::RecordId;

use crate::error::{LedgerError, Result};
use crate::payment::{Payment, PaymentStatus};
use crate::store::PaymentStore;

/// Records, looks up, deletes and lists payments.
#[derive(Clone)]
pub struct PaymentLedger {
    store: Arc<dyn PaymentStore>,
}

impl PaymentLedger {
    pub fn new(store: Arc<dyn PaymentStore>) -> Self {
        Self { store }
    }

    /// Records a payment. The stored status is always `paid`.
    #[tracing::instrument(skip(self))]
    pub async fn add(&self, email: &str, amount: i64) -> Result<Payment> {
        if email.trim().is_empty() {
            return Err(LedgerError::Validation("email is required".to_string()));
        }
        if amount <= 0 {
            return Err(LedgerError::Validation(
                "amount must be greater than zero".to_string(),
            ));
        }

        let payment = Payment::paid(email.to_owned(), amount);
        self.store.insert(&payment).await?;

        metrics::counter!("payments_recorded_total").increment(1);
        tracing::info!(payment_id = %payment.id, "payment recorded");
        Ok(payment)
    }

    pub async fn get(&self, id: &str) -> Result<Payment> {
        let id = parse_id(id)?;
        self.store.get(id).await?.ok_or(LedgerError::NotFound)
    }

    /// Deletes a payment and returns it marked `deleted`.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Payment> {
        let id = parse_id(id)?;
        let mut payment = self.store.delete(id).await?.ok_or(LedgerError::NotFound)?;
        payment.status = PaymentStatus::Deleted;
        tracing::info!(payment_id = %payment.id, "payment deleted");
        Ok(payment)
    }

    pub async fn list(&self) -> Result<Vec<Payment>> {
        Ok(self.store.list().await?)
    }
}

fn parse_id(id: &str) -> Result<RecordId> {
    RecordId::parse(id).map_err(|_| LedgerError::InvalidId(id.to_string()))
}
