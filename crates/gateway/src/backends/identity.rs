use std::time::Duration;

use async_trait::async_trait;
use common::UserClaims;
use rpc::identity::identity_service_client::IdentityServiceClient;
use rpc::identity::{LoginRequest, RegisterRequest, VerifyTokenRequest};
use serde::Serialize;
use tonic::transport::{Channel, Endpoint};

use super::bounded;
use crate::error::BackendError;

/// A freshly registered user, as returned to REST clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Operations the gateway needs from the identity service.
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisteredUser, BackendError>;

    async fn login(&self, email: &str, password: &str) -> Result<String, BackendError>;

    async fn verify_token(&self, token: &str) -> Result<UserClaims, BackendError>;
}

/// Identity backend over `identity.v1.IdentityService`.
#[derive(Debug, Clone)]
pub struct GrpcIdentityBackend {
    client: IdentityServiceClient<Channel>,
    timeout: Duration,
}

impl GrpcIdentityBackend {
    /// Creates a backend whose channel connects on first use.
    pub fn connect_lazy(addr: &str, timeout: Duration) -> Result<Self, tonic::transport::Error> {
        let channel = Endpoint::from_shared(addr.to_string())?
            .connect_timeout(timeout)
            .connect_lazy();
        Ok(Self {
            client: IdentityServiceClient::new(channel),
            timeout,
        })
    }
}

#[async_trait]
impl IdentityBackend for GrpcIdentityBackend {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisteredUser, BackendError> {
        let mut client = self.client.clone();
        let reply = bounded(
            self.timeout,
            client.register(RegisterRequest {
                name: name.to_owned(),
                email: email.to_owned(),
                password: password.to_owned(),
            }),
        )
        .await?;
        Ok(RegisteredUser {
            id: reply.id,
            name: reply.name,
            email: reply.email,
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, BackendError> {
        let mut client = self.client.clone();
        let reply = bounded(
            self.timeout,
            client.login(LoginRequest {
                email: email.to_owned(),
                password: password.to_owned(),
            }),
        )
        .await?;
        Ok(reply.token)
    }

    async fn verify_token(&self, token: &str) -> Result<UserClaims, BackendError> {
        let mut client = self.client.clone();
        let reply = bounded(
            self.timeout,
            client.verify_token(VerifyTokenRequest {
                token: token.to_owned(),
            }),
        )
        .await?;
        Ok(UserClaims::new(reply.id, reply.name, reply.email))
    }
}
