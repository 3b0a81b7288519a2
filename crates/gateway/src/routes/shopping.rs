//! Protected `/products` and `/transactions` routes, passed through to the
//! shopping service.

use std::sync::Arc;

use axum::Extension;
use axum::extract::{Request, State};
use axum::response::Response;
use common::UserClaims;

use crate::AppState;
use crate::dispatch::RequestTrace;
use crate::error::GatewayError;

/// Any method on `/products[/{id}]` or `/transactions[/{id}]`.
pub async fn forward(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<UserClaims>,
    Extension(trace): Extension<RequestTrace>,
    req: Request,
) -> Result<Response, GatewayError> {
    trace
        .dispatch("shopping", state.shopping.forward(req, &claims.email))
        .await
}
