//! `payment.v1.PaymentService`

#[derive(Clone, PartialEq, prost::Message)]
pub struct AddPaymentRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    /// Integer minor units; must be positive.
    #[prost(int64, tag = "2")]
    pub amount: i64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PaymentIdRequest {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetAllPaymentsRequest {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Payment {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub email: String,
    #[prost(int64, tag = "3")]
    pub amount: i64,
    #[prost(string, tag = "4")]
    pub status: String,
    /// RFC 3339 timestamp.
    #[prost(string, tag = "5")]
    pub created_at: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PaymentList {
    #[prost(message, repeated, tag = "1")]
    pub payments: Vec<Payment>,
}

include!(concat!(env!("OUT_DIR"), "/payment.v1.PaymentService.rs"));
