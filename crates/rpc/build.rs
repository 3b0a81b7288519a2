//! Generates tonic client/server stubs for the identity and payment services.
//!
//! Messages are plain Rust structs deriving `prost::Message` (see `src/`), so
//! the services are described with `tonic_build::manual` and no `protoc`
//! toolchain is needed.

use tonic_build::manual::{Builder, Method, Service};

const CODEC: &str = "tonic::codec::ProstCodec";

fn unary(name: &str, route: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(input)
        .output_type(output)
        .codec_path(CODEC)
        .build()
}

fn main() {
    let identity = Service::builder()
        .name("IdentityService")
        .package("identity.v1")
        .method(unary(
            "register",
            "Register",
            "crate::identity::RegisterRequest",
            "crate::identity::UserReply",
        ))
        .method(unary(
            "login",
            "Login",
            "crate::identity::LoginRequest",
            "crate::identity::LoginReply",
        ))
        .method(unary(
            "verify_token",
            "VerifyToken",
            "crate::identity::VerifyTokenRequest",
            "crate::identity::UserReply",
        ))
        .build();

    let payment = Service::builder()
        .name("PaymentService")
        .package("payment.v1")
        .method(unary(
            "add_payment",
            "AddPayment",
            "crate::payment::AddPaymentRequest",
            "crate::payment::Payment",
        ))
        .method(unary(
            "get_payment_by_id",
            "GetPaymentById",
            "crate::payment::PaymentIdRequest",
            "crate::payment::Payment",
        ))
        .method(unary(
            "delete_payment_by_id",
            "DeletePaymentById",
            "crate::payment::PaymentIdRequest",
            "crate::payment::Payment",
        ))
        .method(unary(
            "get_all_payments",
            "GetAllPayments",
            "crate::payment::GetAllPaymentsRequest",
            "crate::payment::PaymentList",
        ))
        .build();

    Builder::new().compile(&[identity, payment]);

    println!("cargo:rerun-if-changed=build.rs");
}
