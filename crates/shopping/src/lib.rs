//! Shopping service.
//!
//! Owns the product catalogue and order records. Creating an order prices it,
//! charges the payment ledger synchronously and stores the outcome, whether
//! the charge was accepted or not.

pub mod catalog;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod payment_client;
pub mod product;
pub mod routes;
pub mod store;
pub mod transaction;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

pub use catalog::ProductCatalog;
pub use error::ShoppingError;
pub use orchestrator::{DEFAULT_UNIT_PRICE, OrderOrchestrator};
pub use payment_client::{
    HttpPaymentClient, InMemoryPaymentGateway, PaymentGateway, PaymentGatewayError,
    PaymentOutcome,
};
pub use product::{Product, ProductDraft};
pub use store::{
    InMemoryOrderStore, InMemoryProductStore, OrderStore, PostgresOrderStore,
    PostgresProductStore, ProductStore, StoreError,
};
pub use transaction::{OrderRequest, Transaction, TransactionStatus};

/// Shared state for all handlers.
pub struct AppState {
    pub orders: OrderOrchestrator,
    pub catalog: ProductCatalog,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/products",
            get(routes::products::list).post(routes::products::create),
        )
        .route(
            "/products/{id}",
            get(routes::products::get)
                .put(routes::products::update)
                .delete(routes::products::delete),
        )
        .route(
            "/transactions",
            get(routes::transactions::list).post(routes::transactions::create),
        )
        .route(
            "/transactions/{id}",
            get(routes::transactions::get)
                .put(routes::transactions::update)
                .delete(routes::transactions::delete),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(TraceLayer::new_for_http())
}
