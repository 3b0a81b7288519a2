//! Identity service entry point.

use std::sync::Arc;

use identity::config::Config;
use identity::{
    Argon2Hasher, IdentityService, InMemoryUserStore, PostgresUserStore, UserStore, grpc_service,
};
use sqlx::postgres::PgPoolOptions;
use token::TokenService;

#[tokio::main]
async fn main() {
    common::telemetry::init("info");

    let config = Config::from_env();
    if config.uses_development_secret() {
        tracing::warn!("JWT_SECRET not set, using the built-in development secret");
    }

    let users: Arc<dyn UserStore> = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .acquire_timeout(config.store_timeout)
                .connect(url)
                .await
                .expect("failed to connect to database");
            let store = PostgresUserStore::new(pool, config.store_timeout);
            store
                .run_migrations()
                .await
                .expect("failed to run migrations");
            tracing::info!("using postgres user store");
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, users are kept in memory");
            Arc::new(InMemoryUserStore::new())
        }
    };

    let tokens = TokenService::with_ttl(
        config.jwt_secret.as_bytes(),
        chrono::Duration::seconds(config.token_ttl_secs),
    );
    let service = Arc::new(IdentityService::new(
        users,
        Arc::new(tokens),
        Arc::new(Argon2Hasher::new()),
    ));

    let addr = config
        .addr()
        .parse()
        .expect("invalid HOST/PORT bind address");
    tracing::info!(%addr, "starting identity gRPC server");

    tonic::transport::Server::builder()
        .add_service(grpc_service(service))
        .serve_with_shutdown(addr, common::shutdown::signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
