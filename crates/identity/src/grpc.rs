//! `identity.v1.IdentityService` server.

use std::sync::Arc;

use rpc::identity::identity_service_server::{
    IdentityService as IdentityServiceRpc, IdentityServiceServer,
};
use rpc::identity::{
    LoginReply, LoginRequest, RegisterRequest, UserReply, VerifyTokenRequest,
};
use tonic::{Request, Response, Status};

use crate::error::IdentityError;
use crate::service::IdentityService;

impl From<IdentityError> for Status {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Validation(msg) => Status::invalid_argument(msg),
            IdentityError::AlreadyRegistered => Status::already_exists(err.to_string()),
            IdentityError::InvalidCredentials | IdentityError::InvalidToken => {
                Status::unauthenticated(err.to_string())
            }
            IdentityError::Store(crate::store::StoreError::Timeout(_)) => {
                tracing::error!(error = %err, "user store timed out");
                Status::unavailable("user store unavailable")
            }
            IdentityError::Hashing(_) | IdentityError::Token(_) | IdentityError::Store(_) => {
                tracing::error!(error = %err, "identity request failed");
                Status::internal("internal error")
            }
        }
    }
}

/// gRPC adapter over [`IdentityService`].
#[derive(Clone)]
pub struct IdentityRpc {
    service: Arc<IdentityService>,
}

impl IdentityRpc {
    pub fn new(service: Arc<IdentityService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl IdentityServiceRpc for IdentityRpc {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<UserReply>, Status> {
        let req = request.into_inner();
        let user = self
            .service
            .register(&req.name, &req.email, &req.password)
            .await?;
        Ok(Response::new(UserReply {
            id: user.id,
            name: user.name,
            email: user.email,
        }))
    }

    async fn login(&self, request: Request<LoginRequest>) -> Result<Response<LoginReply>, Status> {
        let req = request.into_inner();
        let token = self.service.login(&req.email, &req.password).await?;
        Ok(Response::new(LoginReply { token }))
    }

    async fn verify_token(
        &self,
        request: Request<VerifyTokenRequest>,
    ) -> Result<Response<UserReply>, Status> {
        let claims = self.service.verify_token(&request.into_inner().token)?;
        Ok(Response::new(UserReply {
            id: claims.id,
            name: claims.name,
            email: claims.email,
        }))
    }
}

/// Wraps the service into a tonic server ready to be added to a router.
pub fn grpc_service(service: Arc<IdentityService>) -> IdentityServiceServer<IdentityRpc> {
    IdentityServiceServer::new(IdentityRpc::new(service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use tonic::Code;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (IdentityError::Validation("name is required".into()), Code::InvalidArgument),
            (IdentityError::AlreadyRegistered, Code::AlreadyExists),
            (IdentityError::InvalidCredentials, Code::Unauthenticated),
            (IdentityError::InvalidToken, Code::Unauthenticated),
            (
                IdentityError::Store(StoreError::Timeout(std::time::Duration::from_secs(5))),
                Code::Unavailable,
            ),
            (IdentityError::Hashing("boom".into()), Code::Internal),
        ];
        for (err, code) in cases {
            assert_eq!(Status::from(err).code(), code);
        }
    }

    #[test]
    fn test_internal_message_is_generic() {
        let status = Status::from(IdentityError::Hashing("salt exploded".into()));
        assert_eq!(status.message(), "internal error");
    }
}
