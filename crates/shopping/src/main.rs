//! Shopping service entry point.

use std::sync::Arc;

use shopping::config::Config;
use shopping::{
    AppState, HttpPaymentClient, InMemoryOrderStore, InMemoryProductStore, OrderOrchestrator,
    OrderStore, PostgresOrderStore, PostgresProductStore, ProductCatalog, ProductStore,
};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    common::telemetry::init("info");

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    let config = Config::from_env();

    // 3. Stores
    let (orders, products): (Arc<dyn OrderStore>, Arc<dyn ProductStore>) =
        match &config.database_url {
            Some(url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(10)
                    .acquire_timeout(config.store_timeout)
                    .connect(url)
                    .await
                    .expect("failed to connect to database");
                shopping::store::run_migrations(&pool)
                    .await
                    .expect("failed to run migrations");
                tracing::info!("using postgres stores");
                (
                    Arc::new(PostgresOrderStore::new(pool.clone(), config.store_timeout)),
                    Arc::new(PostgresProductStore::new(pool, config.store_timeout)),
                )
            }
            None => {
                tracing::warn!("DATABASE_URL not set, orders and products are kept in memory");
                (
                    Arc::new(InMemoryOrderStore::new()),
                    Arc::new(InMemoryProductStore::new()),
                )
            }
        };

    // 4. Ledger client and application state
    let payments = HttpPaymentClient::new(&config.payment_url, config.payment_timeout)
        .expect("failed to build payment client");
    let state = Arc::new(AppState {
        orders: OrderOrchestrator::new(orders, Arc::new(payments), config.unit_price),
        catalog: ProductCatalog::new(products),
    });

    // 5. Start server
    let app = shopping::create_app(state, metrics_handle);
    let addr = config.addr();
    tracing::info!(%addr, payment_url = %config.payment_url, "starting shopping service");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(common::shutdown::signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
