//! Payment ledger entry point: gRPC and REST listeners over one ledger.

use std::future::IntoFuture;
use std::sync::Arc;

use payment::config::Config;
use payment::{InMemoryPaymentStore, PaymentLedger, PaymentStore, PostgresPaymentStore};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() {
    common::telemetry::init("info");

    let config = Config::from_env();

    let store: Arc<dyn PaymentStore> = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .acquire_timeout(config.store_timeout)
                .connect(url)
                .await
                .expect("failed to connect to database");
            let store = PostgresPaymentStore::new(pool, config.store_timeout);
            store
                .run_migrations()
                .await
                .expect("failed to run migrations");
            tracing::info!("using postgres payment store");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, payments are kept in memory");
            Arc::new(InMemoryPaymentStore::new())
        }
    };
    let ledger = Arc::new(PaymentLedger::new(store));

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(());
    tokio::spawn(async move {
        common::shutdown::signal().await;
        let _ = shutdown_tx.send(());
    });

    let grpc_addr = config
        .grpc_addr()
        .parse()
        .expect("invalid HOST/GRPC_PORT bind address");
    let mut grpc_shutdown = shutdown_rx.clone();
    let grpc = tonic::transport::Server::builder()
        .add_service(payment::grpc_service(Arc::clone(&ledger)))
        .serve_with_shutdown(grpc_addr, async move {
            let _ = grpc_shutdown.changed().await;
        });

    let http_addr = config.http_addr();
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind address");
    let mut http_shutdown = shutdown_rx;
    let http = axum::serve(listener, payment::create_app(ledger))
        .with_graceful_shutdown(async move {
            let _ = http_shutdown.changed().await;
        })
        .into_future();

    tracing::info!(%grpc_addr, %http_addr, "starting payment ledger");
    let (grpc_result, http_result) = tokio::join!(grpc, http);
    grpc_result.expect("gRPC server error");
    http_result.expect("HTTP server error");

    tracing::info!("server shut down gracefully");
}
