//! Identity service.
//!
//! Registers users, checks credentials and issues identity tokens. The
//! service is exposed over gRPC (`identity.v1.IdentityService`) so the
//! gateway can log users in and, optionally, verify tokens remotely.

pub mod config;
pub mod error;
pub mod grpc;
pub mod hasher;
pub mod service;
pub mod store;
pub mod user;

pub use error::IdentityError;
pub use grpc::{IdentityRpc, grpc_service};
pub use hasher::{Argon2Hasher, PasswordHasher};
pub use service::IdentityService;
pub use store::{InMemoryUserStore, PostgresUserStore, StoreError, UserStore};
pub use user::{User, UserView};
