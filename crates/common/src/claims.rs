use serde::{Deserialize, Serialize};

/// The identity a verified token vouches for.
///
/// These are exactly the fields embedded at issuance; nothing is re-fetched
/// from the user store on verification, so they may lag behind the record
/// for at most one token lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl UserClaims {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}
