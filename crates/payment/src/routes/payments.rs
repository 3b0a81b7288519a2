//! `/payments` REST ingress.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;

use crate::error::LedgerError;
use crate::ledger::PaymentLedger;
use crate::payment::Payment;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub amount: i64,
}

/// POST /payments
pub async fn create(
    State(ledger): State<Arc<PaymentLedger>>,
    body: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Payment>), LedgerError> {
    let Json(req) = body.map_err(|e| LedgerError::Validation(e.body_text()))?;
    let payment = ledger.add(&req.email, req.amount).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// GET /payments
pub async fn list(
    State(ledger): State<Arc<PaymentLedger>>,
) -> Result<Json<Vec<Payment>>, LedgerError> {
    Ok(Json(ledger.list().await?))
}

/// GET /payments/{id}
pub async fn get(
    State(ledger): State<Arc<PaymentLedger>>,
    Path(id): Path<String>,
) -> Result<Json<Payment>, LedgerError> {
    Ok(Json(ledger.get(&id).await?))
}

/// DELETE /payments/{id}
pub async fn delete(
    State(ledger): State<Arc<PaymentLedger>>,
    Path(id): Path<String>,
) -> Result<Json<Payment>, LedgerError> {
    Ok(Json(ledger.delete(&id).await?))
}
