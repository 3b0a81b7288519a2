//! Bearer-token boundary for protected routes.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{MatchedPath, Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use common::UserClaims;
use token::TokenService;

use crate::AppState;
use crate::backends::IdentityBackend;
use crate::dispatch::{RequestPhase, RequestTrace};
use crate::error::GatewayError;

/// Turns a bearer token into the identity it vouches for.
///
/// Any failure, including a verifier that cannot be reached, is a rejection.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Option<UserClaims>;
}

/// Verifies tokens in-process with the shared signing secret.
#[derive(Debug, Clone)]
pub struct LocalVerifier {
    tokens: Arc<TokenService>,
}

impl LocalVerifier {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl TokenVerifier for LocalVerifier {
    async fn verify(&self, token: &str) -> Option<UserClaims> {
        self.tokens.verify(token).ok()
    }
}

/// Verifies tokens by asking the identity service.
#[derive(Clone)]
pub struct RemoteVerifier {
    identity: Arc<dyn IdentityBackend>,
}

impl RemoteVerifier {
    pub fn new(identity: Arc<dyn IdentityBackend>) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl TokenVerifier for RemoteVerifier {
    async fn verify(&self, token: &str) -> Option<UserClaims> {
        match self.identity.verify_token(token).await {
            Ok(claims) => Some(claims),
            Err(err) => {
                if err.is_unreachable() {
                    tracing::warn!(error = %err, "identity service unreachable during token check");
                }
                None
            }
        }
    }
}

/// Extracts the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Middleware: rejects with 401 unless the request carries a valid token.
///
/// On success the verified [`UserClaims`] and the request's
/// [`RequestTrace`] are placed in the request extensions.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());
    let mut trace = RequestTrace::new(route);
    trace.advance(RequestPhase::Authenticating);

    let claims = match bearer_token(req.headers()) {
        Some(token) => state.verifier.verify(token).await,
        None => None,
    };

    let Some(claims) = claims else {
        trace.advance(RequestPhase::Rejected);
        return GatewayError::Unauthorized.into_response();
    };

    trace.advance(RequestPhase::Authenticated);
    tracing::debug!(user_id = %claims.id, route = trace.route(), "request authenticated");
    req.extensions_mut().insert(claims);
    req.extensions_mut().insert(trace);
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Basic dXNlcg==")), None);
        assert_eq!(bearer_token(&headers("abc")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_local_verifier() {
        let tokens = Arc::new(TokenService::new(b"gateway-test-secret"));
        let verifier = LocalVerifier::new(Arc::clone(&tokens));
        let claims = UserClaims::new("u-1", "Alice", "a@b.com");

        let token = tokens.issue(&claims).unwrap();
        assert_eq!(verifier.verify(&token).await, Some(claims));
        assert_eq!(verifier.verify("garbage").await, None);
    }
}
