use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use common::RecordId;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use super::{PaymentStore, StoreError};
use crate::payment::{Payment, PaymentStatus};

/// PostgreSQL-backed payment store.
#[derive(Clone)]
pub struct PostgresPaymentStore {
    pool: PgPool,
    op_timeout: Duration,
}

impl PostgresPaymentStore {
    pub fn new(pool: PgPool, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        tokio::time::timeout(self.op_timeout, fut)
            .await
            .map_err(|_| StoreError::Timeout(self.op_timeout))?
            .map_err(StoreError::from)
    }

    fn row_to_payment(row: PgRow) -> Result<Payment, StoreError> {
        let id: Uuid = row.try_get("id")?;
        let status: String = row.try_get("status")?;
        Ok(Payment {
            id: RecordId::from_uuid(id),
            email: row.try_get("email")?,
            amount: row.try_get("amount")?,
            status: status.parse::<PaymentStatus>().map_err(StoreError::Corrupt)?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl PaymentStore for PostgresPaymentStore {
    async fn insert(&self, payment: &Payment) -> Result<(), StoreError> {
        self.bounded(
            sqlx::query(
                r#"
                INSERT INTO payments (id, email, amount, status, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(payment.id.as_uuid())
            .bind(&payment.email)
            .bind(payment.amount)
            .bind(payment.status.as_str())
            .bind(payment.created_at)
            .execute(&self.pool),
        )
        .await?;
        Ok(())
    }

    async fn get(&self, id: RecordId) -> Result<Option<Payment>, StoreError> {
        let row = self
            .bounded(
                sqlx::query(
                    "SELECT id, email, amount, status, created_at FROM payments WHERE id = $1",
                )
                .bind(id.as_uuid())
                .fetch_optional(&self.pool),
            )
            .await?;
        row.map(Self::row_to_payment).transpose()
    }

    async fn delete(&self, id: RecordId) -> Result<Option<Payment>, StoreError> {
        let row = self
            .bounded(
                sqlx::query(
                    r#"
                    DELETE FROM payments
                    WHERE id = $1
                    RETURNING id, email, amount, status, created_at
                    "#,
                )
                .bind(id.as_uuid())
                .fetch_optional(&self.pool),
            )
            .await?;
        row.map(Self::row_to_payment).transpose()
    }

    async fn list(&self) -> Result<Vec<Payment>, StoreError> {
        let rows = self
            .bounded(
                sqlx::query(
                    r#"
                    SELECT id, email, amount, status, created_at
                    FROM payments
                    ORDER BY created_at ASC
                    "#,
                )
                .fetch_all(&self.pool),
            )
            .await?;
        rows.into_iter().map(Self::row_to_payment).collect()
    }
}
