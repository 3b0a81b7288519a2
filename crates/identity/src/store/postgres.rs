use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::{StoreError, UserStore};
use crate::user::User;

const EMAIL_CONSTRAINT: &str = "users_email_key";

/// PostgreSQL-backed user store.
#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
    op_timeout: Duration,
}

impl PostgresUserStore {
    /// Creates a new store; every query is bounded by `op_timeout`.
    pub fn new(pool: PgPool, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    /// Gets a reference to the underlying connection pool.
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

    fn row_to_user(row: PgRow) -> Result<User, sqlx::Error> {
        Ok(User {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let result = self
            .bounded(
                sqlx::query(
                    r#"
                    INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    "#,
                )
                .bind(&user.id)
                .bind(&user.name)
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(user.created_at)
                .bind(user.updated_at)
                .execute(&self.pool),
            )
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(StoreError::Database(sqlx::Error::Database(ref db_err)))
                if db_err.constraint() == Some(EMAIL_CONSTRAINT) =>
            {
                Err(StoreError::DuplicateEmail(user.email.clone()))
            }
            Err(e) => Err(e),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = self
            .bounded(
                sqlx::query(
                    r#"
                    SELECT id, name, email, password_hash, created_at, updated_at
                    FROM users
                    WHERE email = $1
                    "#,
                )
                .bind(email)
                .fetch_optional(&self.pool),
            )
            .await?;

        row.map(Self::row_to_user)
            .transpose()
            .map_err(StoreError::from)
    }
}
