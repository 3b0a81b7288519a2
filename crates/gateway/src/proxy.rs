//! REST passthrough to the shopping service.

use std::time::Duration;

use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderMap, HeaderName, HeaderValue, header};
use axum::response::Response;

use crate::error::GatewayError;

/// Largest request body the gateway buffers for forwarding.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Header carrying the verified caller email to the shopping service.
pub const USER_EMAIL_HEADER: &str = "x-user-email";

static HOP_BY_HOP: [HeaderName; 7] = [
    header::HOST,
    header::CONTENT_LENGTH,
    header::CONNECTION,
    header::TRANSFER_ENCODING,
    header::TE,
    header::TRAILER,
    header::UPGRADE,
];

/// Forwards requests verbatim to one upstream base URL.
#[derive(Debug, Clone)]
pub struct ShoppingProxy {
    client: reqwest::Client,
    base_url: String,
}

impl ShoppingProxy {
    /// Creates a proxy whose every call is bounded by `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Forwards method, path, query, headers and body; relays status,
    /// content type and body. A single attempt, never retried.
    pub async fn forward(&self, req: Request, caller_email: &str) -> Result<Response, GatewayError> {
        let (parts, body) = req.into_parts();
        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let url = format!("{}{}", self.base_url, path_and_query);

        let body = axum::body::to_bytes(body, MAX_BODY_BYTES)
            .await
            .map_err(|_| GatewayError::BadRequest("invalid request body".to_string()))?;

        let mut headers = forwardable_headers(&parts.headers);
        match HeaderValue::from_str(caller_email) {
            Ok(value) => {
                headers.insert(USER_EMAIL_HEADER, value);
            }
            Err(_) => tracing::warn!("caller email is not a valid header value, not forwarded"),
        }

        let upstream = self
            .client
            .request(parts.method, &url)
            .headers(headers)
            .body(body)
            .send()
            .await;
        let upstream = match upstream {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%url, error = %err, timeout = err.is_timeout(), "shopping upstream unreachable");
                return Err(GatewayError::UpstreamUnreachable);
            }
        };

        let status = upstream.status();
        let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
        let bytes = upstream.bytes().await.map_err(|err| {
            tracing::warn!(%url, error = %err, "shopping upstream dropped the response");
            GatewayError::UpstreamUnreachable
        })?;

        let mut response = Response::new(Body::from(bytes));
        *response.status_mut() = status;
        if let Some(content_type) = content_type {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, content_type);
        }
        Ok(response)
    }
}

/// Copies end-to-end headers; hop-by-hop headers and any client-supplied
/// caller email are dropped.
fn forwardable_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if HOP_BY_HOP.contains(name) || name.as_str() == USER_EMAIL_HEADER {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}
