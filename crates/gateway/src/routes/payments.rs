//! Protected `/payments` routes, backed by the payment RPC.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common::UserClaims;
use serde::Deserialize;

use super::bad_body;
use crate::AppState;
use crate::backends::PaymentView;
use crate::dispatch::RequestTrace;
use crate::error::GatewayError;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentBody {
    /// Defaults to the caller's own email.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub amount: i64,
}

/// POST /payments
pub async fn create(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<UserClaims>,
    Extension(trace): Extension<RequestTrace>,
    body: Result<Json<CreatePaymentBody>, JsonRejection>,
) -> Result<(StatusCode, Json<PaymentView>), GatewayError> {
    let Json(body) = body.map_err(bad_body)?;
    let email = body.email.unwrap_or_else(|| claims.email.clone());
    let payment = trace
        .dispatch("payment", async {
            let payment = state
                .payments
                .add_payment(&claims.email, &email, body.amount)
                .await?;
            Ok::<_, GatewayError>(payment)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// GET /payments
pub async fn list(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<UserClaims>,
    Extension(trace): Extension<RequestTrace>,
) -> Result<Json<Vec<PaymentView>>, GatewayError> {
    let payments = trace
        .dispatch("payment", async {
            let payments = state.payments.list_payments(&claims.email).await?;
            Ok::<_, GatewayError>(payments)
        })
        .await?;
    Ok(Json(payments))
}

/// GET /payments/{id}
pub async fn get(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<UserClaims>,
    Extension(trace): Extension<RequestTrace>,
    Path(id): Path<String>,
) -> Result<Json<PaymentView>, GatewayError> {
    let payment = trace
        .dispatch("payment", async {
            let payment = state.payments.get_payment(&claims.email, &id).await?;
            Ok::<_, GatewayError>(payment)
        })
        .await?;
    Ok(Json(payment))
}

/// DELETE /payments/{id}
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<UserClaims>,
    Extension(trace): Extension<RequestTrace>,
    Path(id): Path<String>,
) -> Result<Json<PaymentView>, GatewayError> {
    let payment = trace
        .dispatch("payment", async {
            let payment = state.payments.delete_payment(&claims.email, &id).await?;
            Ok::<_, GatewayError>(payment)
        })
        .await?;
    Ok(Json(payment))
}
