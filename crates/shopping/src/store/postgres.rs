use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use common::RecordId;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use super::{OrderStore, ProductStore, StoreError};
use crate::product::Product;
use crate::transaction::{Transaction, TransactionStatus};

/// Runs the shopping database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

async fn bounded<T, F>(limit: Duration, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| StoreError::Timeout(limit))?
        .map_err(StoreError::from)
}

/// PostgreSQL-backed product store.
#[derive(Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
    op_timeout: Duration,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    fn row_to_product(row: PgRow) -> Result<Product, StoreError> {
        let id: Uuid = row.try_get("id")?;
        Ok(Product {
            id: RecordId::from_uuid(id),
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            stock: row.try_get("stock")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn insert(&self, product: &Product) -> Result<(), StoreError> {
        bounded(
            self.op_timeout,
            sqlx::query(
                r#"
                INSERT INTO products (id, name, price, stock, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(product.id.as_uuid())
            .bind(&product.name)
            .bind(product.price)
            .bind(product.stock)
            .bind(product.created_at)
            .execute(&self.pool),
        )
        .await?;
        Ok(())
    }

    async fn get(&self, id: RecordId) -> Result<Option<Product>, StoreError> {
        let row = bounded(
            self.op_timeout,
            sqlx::query("SELECT id, name, price, stock, created_at FROM products WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool),
        )
        .await?;
        row.map(Self::row_to_product).transpose()
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let rows = bounded(
            self.op_timeout,
            sqlx::query(
                "SELECT id, name, price, stock, created_at FROM products ORDER BY created_at ASC",
            )
            .fetch_all(&self.pool),
        )
        .await?;
        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn update(&self, product: &Product) -> Result<bool, StoreError> {
        let result = bounded(
            self.op_timeout,
            sqlx::query("UPDATE products SET name = $2, price = $3, stock = $4 WHERE id = $1")
                .bind(product.id.as_uuid())
                .bind(&product.name)
                .bind(product.price)
                .bind(product.stock)
                .execute(&self.pool),
        )
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        let result = bounded(
            self.op_timeout,
            sqlx::query("DELETE FROM products WHERE id = $1")
                .bind(id.as_uuid())
                .execute(&self.pool),
        )
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

/// PostgreSQL-backed order store.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
    op_timeout: Duration,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    fn row_to_transaction(row: PgRow) -> Result<Transaction, StoreError> {
        let id: Uuid = row.try_get("id")?;
        let status: String = row.try_get("status")?;
        Ok(Transaction {
            id: RecordId::from_uuid(id),
            product_id: row.try_get("product_id")?,
            payment_id: row.try_get("payment_id")?,
            email: row.try_get("email")?,
            quantity: row.try_get("quantity")?,
            total: row.try_get("total")?,
            status: status
                .parse::<TransactionStatus>()
                .map_err(StoreError::Corrupt)?,
            created_at: row.try_get("created_at")?,
        })
    }
}

const TRANSACTION_COLUMNS: &str =
    "id, product_id, payment_id, email, quantity, total, status, created_at";

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn insert(&self, transaction: &Transaction) -> Result<(), StoreError> {
        bounded(
            self.op_timeout,
            sqlx::query(
                r#"
                INSERT INTO transactions
                    (id, product_id, payment_id, email, quantity, total, status, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(transaction.id.as_uuid())
            .bind(&transaction.product_id)
            .bind(&transaction.payment_id)
            .bind(&transaction.email)
            .bind(transaction.quantity)
            .bind(transaction.total)
            .bind(transaction.status.as_str())
            .bind(transaction.created_at)
            .execute(&self.pool),
        )
        .await?;
        Ok(())
    }

    async fn get(&self, id: RecordId) -> Result<Option<Transaction>, StoreError> {
        let sql = format!("SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = $1");
        let row = bounded(
            self.op_timeout,
            sqlx::query(&sql)
                .bind(id.as_uuid())
                .fetch_optional(&self.pool),
        )
        .await?;
        row.map(Self::row_to_transaction).transpose()
    }

    async fn list(&self) -> Result<Vec<Transaction>, StoreError> {
        let sql = format!("SELECT {TRANSACTION_COLUMNS} FROM transactions ORDER BY created_at ASC");
        let rows = bounded(self.op_timeout, sqlx::query(&sql).fetch_all(&self.pool)).await?;
        rows.into_iter().map(Self::row_to_transaction).collect()
    }

    async fn update(&self, transaction: &Transaction) -> Result<bool, StoreError> {
        let result = bounded(
            self.op_timeout,
            sqlx::query(
                r#"
                UPDATE transactions
                SET product_id = $2, email = $3, quantity = $4, total = $5
                WHERE id = $1
                "#,
            )
            .bind(transaction.id.as_uuid())
            .bind(&transaction.product_id)
            .bind(&transaction.email)
            .bind(transaction.quantity)
            .bind(transaction.total)
            .execute(&self.pool),
        )
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        let result = bounded(
            self.op_timeout,
            sqlx::query("DELETE FROM transactions WHERE id = $1")
                .bind(id.as_uuid())
                .execute(&self.pool),
        )
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
