//! Order creation across the shopping store and the payment ledger.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use common::RecordId;

use crate::error::{Result, ShoppingError};
use crate::payment_client::{PaymentGateway, PaymentOutcome};
use crate::store::OrderStore;
use crate::transaction::{OrderRequest, Transaction, TransactionStatus};

/// Default price of one item, in minor units.
pub const DEFAULT_UNIT_PRICE: i64 = 10_000;

/// Validates, prices and pays for orders, then records the outcome.
///
/// ```text
/// validate ──► price ──► charge ──┬── completed ──► persist ──┬──► Ok(success)
///                                 │                            └──► PaymentFailed
///                                 └── not completed ──► PaymentRequest (nothing stored)
/// ```
pub struct OrderOrchestrator {
    orders: Arc<dyn OrderStore>,
    payments: Arc<dyn PaymentGateway>,
    unit_price: i64,
}

impl OrderOrchestrator {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        payments: Arc<dyn PaymentGateway>,
        unit_price: i64,
    ) -> Self {
        Self {
            orders,
            payments,
            unit_price,
        }
    }

    /// Creates an order.
    ///
    /// Both payment outcomes are persisted; a declined payment is returned as
    /// [`ShoppingError::PaymentFailed`] carrying the stored record's id.
    #[tracing::instrument(skip(self, request), fields(email = %request.email, product_id = %request.product_id))]
    pub async fn create(&self, request: OrderRequest) -> Result<Transaction> {
        let total = request.validate_and_price(self.unit_price)?;

        let started = Instant::now();
        let outcome = self.payments.charge(&request.email, total).await;
        metrics::histogram!("order_payment_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        let outcome = outcome.map_err(|e| {
            metrics::counter!("orders_created_total", "status" => "unreachable").increment(1);
            ShoppingError::PaymentRequest(e)
        })?;

        let (status, payment_id) = match outcome {
            PaymentOutcome::Settled { payment_id } => (TransactionStatus::Success, Some(payment_id)),
            PaymentOutcome::Declined { reason } => {
                tracing::info!(%reason, "payment declined");
                (TransactionStatus::Failed, None)
            }
        };

        let transaction = Transaction {
            id: RecordId::new(),
            product_id: request.product_id,
            payment_id,
            email: request.email,
            quantity: request.quantity,
            total,
            status,
            created_at: Utc::now(),
        };
        self.orders.insert(&transaction).await?;
        metrics::counter!("orders_created_total", "status" => status.as_str()).increment(1);

        match status {
            TransactionStatus::Success => {
                tracing::info!(transaction_id = %transaction.id, "order created");
                Ok(transaction)
            }
            TransactionStatus::Failed => Err(ShoppingError::PaymentFailed {
                transaction_id: transaction.id,
            }),
        }
    }

    pub async fn list(&self) -> Result<Vec<Transaction>> {
        Ok(self.orders.list().await?)
    }

    pub async fn get(&self, id: &str) -> Result<Transaction> {
        let id = parse_id(id)?;
        self.orders
            .get(id)
            .await?
            .ok_or(ShoppingError::NotFound("transaction"))
    }

    /// Re-validates and re-prices an order. Payment fields are left as they
    /// were; no new charge is made.
    #[tracing::instrument(skip(self, request))]
    pub async fn update(&self, id: &str, request: OrderRequest) -> Result<Transaction> {
        let id = parse_id(id)?;
        let total = request.validate_and_price(self.unit_price)?;

        let mut transaction = self
            .orders
            .get(id)
            .await?
            .ok_or(ShoppingError::NotFound("transaction"))?;
        transaction.product_id = request.product_id;
        transaction.email = request.email;
        transaction.quantity = request.quantity;
        transaction.total = total;

        if !self.orders.update(&transaction).await? {
            return Err(ShoppingError::NotFound("transaction"));
        }
        Ok(transaction)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = parse_id(id)?;
        if !self.orders.delete(id).await? {
            return Err(ShoppingError::NotFound("transaction"));
        }
        Ok(())
    }
}

fn parse_id(id: &str) -> Result<RecordId> {
    RecordId::parse(id).map_err(|_| ShoppingError::InvalidId("transaction"))
}
