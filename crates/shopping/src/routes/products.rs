//! `/products` endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use super::{Ack, bad_body};
use crate::AppState;
use crate::error::ShoppingError;
use crate::product::{Product, ProductDraft};

/// POST /products
pub async fn create(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Ack<Product>>), ShoppingError> {
    let Json(draft) = body.map_err(bad_body)?;
    let product = state.catalog.create(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(Ack::with_data("product created", product)),
    ))
}

/// GET /products
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Product>>, ShoppingError> {
    Ok(Json(state.catalog.list().await?))
}

/// GET /products/{id}
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ShoppingError> {
    Ok(Json(state.catalog.get(&id).await?))
}

/// PUT /products/{id}
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<Json<Ack<Product>>, ShoppingError> {
    let Json(draft) = body.map_err(bad_body)?;
    let product = state.catalog.update(&id, draft).await?;
    Ok(Json(Ack::with_data("product updated", product)))
}

/// DELETE /products/{id}
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Ack<()>>, ShoppingError> {
    state.catalog.delete(&id).await?;
    Ok(Json(Ack::message("product deleted")))
}
