//! `/transactions` endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};

use super::{Ack, bad_body};
use crate::AppState;
use crate::error::ShoppingError;
use crate::transaction::{OrderRequest, Transaction};

/// Header set by the gateway with the verified caller's email.
const USER_EMAIL_HEADER: &str = "x-user-email";

/// POST /transactions
pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Ack<Transaction>>), ShoppingError> {
    let Json(request) = body.map_err(bad_body)?;
    if let Some(caller) = headers.get(USER_EMAIL_HEADER).and_then(|v| v.to_str().ok()) {
        tracing::debug!(%caller, "order placed through gateway");
    }
    let transaction = state.orders.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(Ack::with_data("transaction created", transaction)),
    ))
}

/// GET /transactions
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Transaction>>, ShoppingError> {
    Ok(Json(state.orders.list().await?))
}

/// GET /transactions/{id}
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Transaction>, ShoppingError> {
    Ok(Json(state.orders.get(&id).await?))
}

/// PUT /transactions/{id}
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<Ack<Transaction>>, ShoppingError> {
    let Json(request) = body.map_err(bad_body)?;
    let transaction = state.orders.update(&id, request).await?;
    Ok(Json(Ack::with_data("transaction updated", transaction)))
}

/// DELETE /transactions/{id}
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Ack<()>>, ShoppingError> {
    state.orders.delete(&id).await?;
    Ok(Json(Ack::message("transaction deleted")))
}
