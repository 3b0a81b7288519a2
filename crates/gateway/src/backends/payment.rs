use std::time::Duration;

use async_trait::async_trait;
use rpc::payment::payment_service_client::PaymentServiceClient;
use rpc::payment::{AddPaymentRequest, GetAllPaymentsRequest, Payment, PaymentIdRequest};
use serde::Serialize;
use tonic::transport::{Channel, Endpoint};

use super::{bounded, with_caller};
use crate::error::BackendError;

/// A ledger record, re-serialised for REST clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentView {
    pub id: String,
    pub email: String,
    pub amount: i64,
    pub status: String,
    pub created_at: String,
}

impl From<Payment> for PaymentView {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            email: p.email,
            amount: p.amount,
            status: p.status,
            created_at: p.created_at,
        }
    }
}

/// Operations the gateway needs from the payment ledger.
///
/// `caller` is the verified email of the user making the request.
#[async_trait]
pub trait PaymentBackend: Send + Sync {
    async fn add_payment(
        &self,
        caller: &str,
        email: &str,
        amount: i64,
    ) -> Result<PaymentView, BackendError>;

    async fn get_payment(&self, caller: &str, id: &str) -> Result<PaymentView, BackendError>;

    async fn delete_payment(&self, caller: &str, id: &str) -> Result<PaymentView, BackendError>;

    async fn list_payments(&self, caller: &str) -> Result<Vec<PaymentView>, BackendError>;
}

/// Payment backend over `payment.v1.PaymentService`.
#[derive(Debug, Clone)]
pub struct GrpcPaymentBackend {
    client: PaymentServiceClient<Channel>,
    timeout: Duration,
}

impl GrpcPaymentBackend {
    /// Creates a backend whose channel connects on first use.
    pub fn connect_lazy(addr: &str, timeout: Duration) -> Result<Self, tonic::transport::Error> {
        let channel = Endpoint::from_shared(addr.to_string())?
            .connect_timeout(timeout)
            .connect_lazy();
        Ok(Self {
            client: PaymentServiceClient::new(channel),
            timeout,
        })
    }
}

#[async_trait]
impl PaymentBackend for GrpcPaymentBackend {
    async fn add_payment(
        &self,
        caller: &str,
        email: &str,
        amount: i64,
    ) -> Result<PaymentView, BackendError> {
        let mut client = self.client.clone();
        let request = with_caller(
            AddPaymentRequest {
                email: email.to_owned(),
                amount,
            },
            caller,
        );
        Ok(bounded(self.timeout, client.add_payment(request)).await?.into())
    }

    async fn get_payment(&self, caller: &str, id: &str) -> Result<PaymentView, BackendError> {
        let mut client = self.client.clone();
        let request = with_caller(PaymentIdRequest { id: id.to_owned() }, caller);
        Ok(bounded(self.timeout, client.get_payment_by_id(request))
            .await?
            .into())
    }

    async fn delete_payment(&self, caller: &str, id: &str) -> Result<PaymentView, BackendError> {
        let mut client = self.client.clone();
        let request = with_caller(PaymentIdRequest { id: id.to_owned() }, caller);
        Ok(bounded(self.timeout, client.delete_payment_by_id(request))
            .await?
            .into())
    }

    async fn list_payments(&self, caller: &str) -> Result<Vec<PaymentView>, BackendError> {
        let mut client = self.client.clone();
        let request = with_caller(GetAllPaymentsRequest {}, caller);
        let list = bounded(self.timeout, client.get_all_payments(request)).await?;
        Ok(list.payments.into_iter().map(Into::into).collect())
    }
}
