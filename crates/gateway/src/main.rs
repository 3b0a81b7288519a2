//! Gateway entry point.

use std::sync::Arc;

use gateway::config::{AuthMode, Config};
use gateway::{
    AppState, GrpcIdentityBackend, GrpcPaymentBackend, IdentityBackend, LocalVerifier,
    RemoteVerifier, ShoppingProxy, TokenVerifier,
};
use token::TokenService;

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    common::telemetry::init("info");

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    let config = Config::from_env();

    // 3. Backends
    let identity: Arc<dyn IdentityBackend> = Arc::new(
        GrpcIdentityBackend::connect_lazy(&config.identity_addr, config.upstream_timeout)
            .expect("invalid AUTH_SERVICE_ADDR"),
    );
    let payments = GrpcPaymentBackend::connect_lazy(&config.payment_addr, config.upstream_timeout)
        .expect("invalid PAYMENT_SERVICE_GRPC_ADDR");
    let shopping = ShoppingProxy::new(&config.shopping_url, config.upstream_timeout)
        .expect("failed to build shopping client");

    // 4. Token verification
    let verifier: Arc<dyn TokenVerifier> = match config.auth_mode {
        AuthMode::Local => {
            if config.uses_development_secret() {
                tracing::warn!("JWT_SECRET not set, using the development secret");
            }
            Arc::new(LocalVerifier::new(Arc::new(TokenService::new(
                config.jwt_secret.as_bytes(),
            ))))
        }
        AuthMode::Remote => Arc::new(RemoteVerifier::new(Arc::clone(&identity))),
    };

    let state = Arc::new(AppState {
        identity,
        payments: Arc::new(payments),
        shopping,
        verifier,
    });

    // 5. Start server
    let app = gateway::create_app(state, metrics_handle);
    let addr = config.addr();
    tracing::info!(
        %addr,
        auth_mode = ?config.auth_mode,
        identity = %config.identity_addr,
        payment = %config.payment_addr,
        shopping = %config.shopping_url,
        "starting gateway"
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(common::shutdown::signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
