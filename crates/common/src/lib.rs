//! Types and process plumbing shared by every storefront service.

pub mod claims;
pub mod error;
pub mod shutdown;
pub mod telemetry;
pub mod types;

pub use claims::UserClaims;
pub use error::{ErrorBody, ErrorDetail};
pub use types::{RecordId, has_email_marker};
