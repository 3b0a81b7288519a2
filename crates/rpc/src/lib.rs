//! gRPC contracts shared by servers and clients.
//!
//! `identity` and `payment` each hold the wire messages plus the generated
//! `*_client` / `*_server` modules.

pub mod identity;
pub mod payment;

/// Metadata key carrying the verified caller email on gateway → backend calls.
pub const USER_EMAIL_METADATA: &str = "x-user-email";
