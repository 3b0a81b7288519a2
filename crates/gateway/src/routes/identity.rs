//! Public `/login` and `/register`, backed by the identity RPC.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use super::bad_body;
use crate::AppState;
use crate::backends::RegisteredUser;
use crate::dispatch::RequestTrace;
use crate::error::GatewayError;

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<Json<TokenResponse>, GatewayError> {
    let Json(body) = body.map_err(bad_body)?;
    let token = RequestTrace::new("/login")
        .dispatch("identity", async {
            let token = state.identity.login(&body.email, &body.password).await?;
            Ok::<_, GatewayError>(token)
        })
        .await?;
    Ok(Json(TokenResponse { token }))
}

/// POST /register
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterBody>, JsonRejection>,
) -> Result<Json<RegisteredUser>, GatewayError> {
    let Json(body) = body.map_err(bad_body)?;
    let user = RequestTrace::new("/register")
        .dispatch("identity", async {
            let user = state
                .identity
                .register(&body.name, &body.email, &body.password)
                .await?;
            Ok::<_, GatewayError>(user)
        })
        .await?;
    Ok(Json(user))
}
