//! User record.

use chrono::{DateTime, Utc};
use common::UserClaims;
use serde::Serialize;

/// A stored user. The password hash stays inside the service.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Builds a new user with a fresh id and creation/update stamps.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Outbound view without the password hash.
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    /// The claim set embedded in tokens issued for this user.
    pub fn claims(&self) -> UserClaims {
        UserClaims::new(self.id.clone(), self.name.clone(), self.email.clone())
    }
}

/// What callers get back from registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
}
