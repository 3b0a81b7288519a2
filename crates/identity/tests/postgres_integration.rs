//! PostgreSQL user store tests.
//!
//! Require a Docker daemon. Run with:
//!
//! ```bash
//! cargo test -p identity --test postgres_integration -- --ignored
//! ```

use std::time::Duration;

use identity::{PostgresUserStore, StoreError, User, UserStore};
use sqlx::postgres::PgPoolOptions;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;

async fn start() -> (ContainerAsync<Postgres>, PostgresUserStore) {
    let container = Postgres::default().start().await.unwrap();
    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let url = format!("postgres://postgres:postgres@{host}:{port}/postgres");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .unwrap();
    let store = PostgresUserStore::new(pool, Duration::from_secs(5));
    store.run_migrations().await.unwrap();
    (container, store)
}

fn user(email: &str) -> User {
    User::new("Alice".into(), email.into(), "$argon2id$stub".into())
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn insert_and_find_by_email() {
    let (_container, store) = start().await;
    let alice = user("alice@example.com");
    store.insert(&alice).await.unwrap();

    let found = store
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, alice.id);
    assert_eq!(found.password_hash, alice.password_hash);
    assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn unique_constraint_maps_to_duplicate_email() {
    let (_container, store) = start().await;
    store.insert(&user("dup@example.com")).await.unwrap();

    let result = store.insert(&user("dup@example.com")).await;
    assert!(matches!(result, Err(StoreError::DuplicateEmail(email)) if email == "dup@example.com"));
}
