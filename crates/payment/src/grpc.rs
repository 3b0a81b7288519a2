//! `payment.v1.PaymentService` server.

use std::sync::Arc;

use rpc::USER_EMAIL_METADATA;
use rpc::payment::payment_service_server::{PaymentService, PaymentServiceServer};
use rpc::payment::{
    AddPaymentRequest, GetAllPaymentsRequest, Payment, PaymentIdRequest, PaymentList,
};
use tonic::{Request, Response, Status};

use crate::ledger::PaymentLedger;

/// gRPC adapter over [`PaymentLedger`].
#[derive(Clone)]
pub struct PaymentRpc {
    ledger: Arc<PaymentLedger>,
}

impl PaymentRpc {
    pub fn new(ledger: Arc<PaymentLedger>) -> Self {
        Self { ledger }
    }
}

fn caller<T>(request: &Request<T>) -> &str {
    request
        .metadata()
        .get(USER_EMAIL_METADATA)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
}

#[tonic::async_trait]
impl PaymentService for PaymentRpc {
    async fn add_payment(
        &self,
        request: Request<AddPaymentRequest>,
    ) -> Result<Response<Payment>, Status> {
        tracing::debug!(caller = caller(&request), "AddPayment");
        let req = request.into_inner();
        let payment = self.ledger.add(&req.email, req.amount).await?;
        Ok(Response::new(payment.into()))
    }

    async fn get_payment_by_id(
        &self,
        request: Request<PaymentIdRequest>,
    ) -> Result<Response<Payment>, Status> {
        tracing::debug!(caller = caller(&request), "GetPaymentById");
        let payment = self.ledger.get(&request.into_inner().id).await?;
        Ok(Response::new(payment.into()))
    }

    async fn delete_payment_by_id(
        &self,
        request: Request<PaymentIdRequest>,
    ) -> Result<Response<Payment>, Status> {
        tracing::debug!(caller = caller(&request), "DeletePaymentById");
        let payment = self.ledger.delete(&request.into_inner().id).await?;
        Ok(Response::new(payment.into()))
    }

    async fn get_all_payments(
        &self,
        request: Request<GetAllPaymentsRequest>,
    ) -> Result<Response<PaymentList>, Status> {
        tracing::debug!(caller = caller(&request), "GetAllPayments");
        let payments = self.ledger.list().await?;
        Ok(Response::new(PaymentList {
            payments: payments.into_iter().map(Into::into).collect(),
        }))
    }
}

/// Wraps the ledger into a tonic server ready to be added to a router.
pub fn grpc_service(ledger: Arc<PaymentLedger>) -> PaymentServiceServer<PaymentRpc> {
    PaymentServiceServer::new(PaymentRpc::new(ledger))
}
