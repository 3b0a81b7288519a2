//! Request gateway.
//!
//! Single REST entry point for clients. `/login`, `/register` and `/health`
//! are public; every other route requires a bearer token, which is checked
//! before any backend is contacted. Identity and payment calls are
//! translated to RPC, shopping routes are relayed as-is with the caller's
//! email attached.

pub mod auth;
pub mod backends;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod proxy;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::{any, get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

pub use auth::{LocalVerifier, RemoteVerifier, TokenVerifier};
pub use backends::{
    GrpcIdentityBackend, GrpcPaymentBackend, IdentityBackend, PaymentBackend, PaymentView,
    RegisteredUser,
};
pub use config::{AuthMode, Config};
pub use dispatch::{RequestPhase, RequestTrace};
pub use error::{BackendError, GatewayError};
pub use proxy::ShoppingProxy;

/// Shared state for all handlers.
pub struct AppState {
    pub identity: Arc<dyn IdentityBackend>,
    pub payments: Arc<dyn PaymentBackend>,
    pub shopping: ShoppingProxy,
    pub verifier: Arc<dyn TokenVerifier>,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    let protected = Router::new()
        .route("/products", any(routes::shopping::forward))
        .route("/products/{id}", any(routes::shopping::forward))
        .route("/transactions", any(routes::shopping::forward))
        .route("/transactions/{id}", any(routes::shopping::forward))
        .route(
            "/payments",
            get(routes::payments::list).post(routes::payments::create),
        )
        .route(
            "/payments/{id}",
            get(routes::payments::get).delete(routes::payments::delete),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::require_bearer,
        ));

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/login", post(routes::identity::login))
        .route("/register", post(routes::identity::register))
        .merge(protected)
        .with_state(state)
        .merge(metrics_router)
        .layer(TraceLayer::new_for_http())
}
