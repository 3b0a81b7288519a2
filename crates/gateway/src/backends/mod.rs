//! RPC backends reached through the gateway.

pub mod identity;
pub mod payment;

use std::future::Future;
use std::time::Duration;

use tonic::metadata::MetadataValue;
use tonic::{Request, Response, Status};

use crate::error::BackendError;

pub use identity::{GrpcIdentityBackend, IdentityBackend, RegisteredUser};
pub use payment::{GrpcPaymentBackend, PaymentBackend, PaymentView};

/// Runs one RPC under `limit`; a late answer is a [`BackendError::Timeout`].
async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, BackendError>
where
    F: Future<Output = Result<Response<T>, Status>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => Ok(result?.into_inner()),
        Err(_) => Err(BackendError::Timeout),
    }
}

/// Wraps a message and attaches the verified caller email as metadata.
fn with_caller<T>(message: T, caller: &str) -> Request<T> {
    let mut request = Request::new(message);
    match MetadataValue::try_from(caller) {
        Ok(value) => {
            request
                .metadata_mut()
                .insert(rpc::USER_EMAIL_METADATA, value);
        }
        Err(_) => tracing::warn!("caller email is not valid metadata, not forwarded"),
    }
    request
}
