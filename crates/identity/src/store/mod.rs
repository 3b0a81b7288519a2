//! User persistence.

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::user::User;

pub use memory::InMemoryUserStore;
pub use postgres::PostgresUserStore;

/// Errors that can occur when interacting with the user store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The email is already taken. Authoritative signal for duplicate
    /// registrations, even when two requests race past the pre-check.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// The store did not answer within its bound.
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Storage capability for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] if the email is taken.
    async fn insert(&self, user: &User) -> Result<(), StoreError>;

    /// Looks up a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}
