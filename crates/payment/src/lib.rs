//! Payment ledger service.
//!
//! Records payment attempts against an email and amount. The ledger is
//! served over gRPC (`payment.v1.PaymentService`, used by the gateway) and
//! over REST (`/payments`, used by the shopping service).

pub mod config;
pub mod error;
pub mod grpc;
pub mod ledger;
pub mod payment;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

pub use error::LedgerError;
pub use grpc::{PaymentRpc, grpc_service};
pub use ledger::PaymentLedger;
pub use payment::{Payment, PaymentStatus};
pub use store::{InMemoryPaymentStore, PaymentStore, PostgresPaymentStore, StoreError};

/// Creates the REST router for the ledger.
pub fn create_app(ledger: Arc<PaymentLedger>) -> Router {
    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/payments",
            get(routes::payments::list).post(routes::payments::create),
        )
        .route(
            "/payments/{id}",
            get(routes::payments::get).delete(routes::payments::delete),
        )
        .with_state(ledger)
        .layer(TraceLayer::new_for_http())
}
