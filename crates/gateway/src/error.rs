//! Gateway error types and their REST rendering.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::ErrorBody;
use thiserror::Error;
use tonic::{Code, Status};

/// A backend RPC that failed.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered with a non-OK status.
    #[error("backend returned {:?}: {}", .0.code(), .0.message())]
    Status(Status),

    /// The call did not finish within the configured bound.
    #[error("backend call timed out")]
    Timeout,
}

impl From<Status> for BackendError {
    fn from(status: Status) -> Self {
        BackendError::Status(status)
    }
}

impl BackendError {
    /// True when the backend never produced an answer of its own.
    pub fn is_unreachable(&self) -> bool {
        match self {
            BackendError::Timeout => true,
            BackendError::Status(status) => {
                matches!(status.code(), Code::Unavailable | Code::DeadlineExceeded)
            }
        }
    }
}

/// Errors returned by gateway handlers.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Missing, malformed or rejected bearer token.
    #[error("unauthorized")]
    Unauthorized,

    /// The inbound request itself is malformed.
    #[error("{0}")]
    BadRequest(String),

    /// An RPC backend failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The passthrough upstream could not be reached.
    #[error("upstream unreachable")]
    UpstreamUnreachable,
}

impl GatewayError {
    /// True when the failure means the backend was never reached.
    pub fn is_upstream_failure(&self) -> bool {
        match self {
            GatewayError::UpstreamUnreachable => true,
            GatewayError::Backend(err) => err.is_unreachable(),
            GatewayError::Unauthorized | GatewayError::BadRequest(_) => false,
        }
    }
}

fn backend_response(err: &BackendError) -> (StatusCode, String) {
    let status = match err {
        BackendError::Timeout => {
            return (StatusCode::BAD_GATEWAY, "upstream unreachable".to_string());
        }
        BackendError::Status(status) => status,
    };

    match status.code() {
        Code::InvalidArgument => (StatusCode::BAD_REQUEST, status.message().to_string()),
        Code::Unauthenticated => (StatusCode::UNAUTHORIZED, status.message().to_string()),
        Code::NotFound => (StatusCode::NOT_FOUND, status.message().to_string()),
        Code::AlreadyExists => (StatusCode::CONFLICT, status.message().to_string()),
        Code::Unavailable | Code::DeadlineExceeded => {
            tracing::warn!(code = ?status.code(), message = status.message(), "backend unreachable");
            (StatusCode::BAD_GATEWAY, "upstream unreachable".to_string())
        }
        code => {
            tracing::error!(?code, message = status.message(), "backend failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            GatewayError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            GatewayError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            GatewayError::Backend(err) => backend_response(err),
            GatewayError::UpstreamUnreachable => (StatusCode::BAD_GATEWAY, self.to_string()),
        };

        (status, Json(ErrorBody::new(status.as_u16(), message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(status: Status) -> StatusCode {
        GatewayError::Backend(status.into()).into_response().status()
    }

    #[test]
    fn test_grpc_code_mapping() {
        assert_eq!(status_of(Status::invalid_argument("x")), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(Status::unauthenticated("x")), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(Status::not_found("x")), StatusCode::NOT_FOUND);
        assert_eq!(status_of(Status::already_exists("x")), StatusCode::CONFLICT);
        assert_eq!(status_of(Status::unavailable("x")), StatusCode::BAD_GATEWAY);
        assert_eq!(status_of(Status::deadline_exceeded("x")), StatusCode::BAD_GATEWAY);
        assert_eq!(status_of(Status::internal("x")), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_of(Status::unknown("x")), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_timeout_is_bad_gateway() {
        let response = GatewayError::Backend(BackendError::Timeout).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_upstream_failure_classification() {
        assert!(GatewayError::UpstreamUnreachable.is_upstream_failure());
        assert!(GatewayError::Backend(BackendError::Timeout).is_upstream_failure());
        assert!(GatewayError::Backend(Status::unavailable("down").into()).is_upstream_failure());
        assert!(!GatewayError::Backend(Status::not_found("gone").into()).is_upstream_failure());
        assert!(!GatewayError::Unauthorized.is_upstream_failure());
    }
}
