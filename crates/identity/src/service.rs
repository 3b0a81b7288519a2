//! Registration, login and token verification.

use std::sync::Arc;

use common::{UserClaims, has_email_marker};
use token::TokenService;

use crate::error::{IdentityError, Result};
use crate::hasher::PasswordHasher;
use crate::store::{StoreError, UserStore};
use crate::user::{User, UserView};

/// Identity operations over an injected user store, token service and hasher.
#[derive(Clone)]
pub struct IdentityService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
    hasher: Arc<dyn PasswordHasher>,
}

impl IdentityService {
    /// Creates a new identity service.
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: Arc<TokenService>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }

    /// Registers a new user and returns it without the password hash.
    ///
    /// The existence check is only a fast path; the store's uniqueness
    /// guarantee decides concurrent registrations for the same email.
    #[tracing::instrument(skip(self, name, password), fields(email = %email))]
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<UserView> {
        if name.trim().is_empty() {
            return Err(IdentityError::Validation("name is required".to_string()));
        }
        if !has_email_marker(email) {
            return Err(IdentityError::Validation("invalid email format".to_string()));
        }
        if password.is_empty() {
            return Err(IdentityError::Validation("password is required".to_string()));
        }

        if self.users.find_by_email(email).await?.is_some() {
            return Err(IdentityError::AlreadyRegistered);
        }

        let hasher = Arc::clone(&self.hasher);
        let plain = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&plain))
            .await
            .map_err(|e| IdentityError::Hashing(e.to_string()))?
            .map_err(|e| IdentityError::Hashing(e.to_string()))?;

        let user = User::new(name.to_owned(), email.to_owned(), password_hash);
        match self.users.insert(&user).await {
            Ok(()) => {}
            Err(StoreError::DuplicateEmail(_)) => return Err(IdentityError::AlreadyRegistered),
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user.view())
    }

    /// Checks credentials and issues a token.
    ///
    /// Unknown email and wrong password are reported identically.
    #[tracing::instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let Some(user) = self.users.find_by_email(email).await? else {
            metrics::counter!("identity_logins_total", "outcome" => "rejected").increment(1);
            return Err(IdentityError::InvalidCredentials);
        };

        let hasher = Arc::clone(&self.hasher);
        let hash = user.password_hash.clone();
        let plain = password.to_owned();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&hash, &plain))
            .await
            .map_err(|e| IdentityError::Hashing(e.to_string()))?;

        if !matches {
            metrics::counter!("identity_logins_total", "outcome" => "rejected").increment(1);
            return Err(IdentityError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.claims())?;
        metrics::counter!("identity_logins_total", "outcome" => "accepted").increment(1);
        Ok(token)
    }

    /// Verifies a token issued by this service.
    pub fn verify_token(&self, token: &str) -> Result<UserClaims> {
        Ok(self.tokens.verify(token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::Argon2Hasher;
    use crate::store::InMemoryUserStore;

    fn service() -> (IdentityService, InMemoryUserStore) {
        let store = InMemoryUserStore::new();
        let service = IdentityService::new(
            Arc::new(store.clone()),
            Arc::new(TokenService::new(b"identity-test-secret")),
            Arc::new(Argon2Hasher::new()),
        );
        (service, store)
    }

    #[tokio::test]
    async fn test_register_returns_view_without_password() {
        let (service, store) = service();
        let view = service
            .register("Alice", "alice@example.com", "secret")
            .await
            .unwrap();

        assert_eq!(view.name, "Alice");
        assert_eq!(view.email, "alice@example.com");
        assert!(uuid::Uuid::parse_str(&view.id).is_ok());

        let stored = store.find_by_email("alice@example.com").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "secret");
        assert_eq!(stored.created_at, stored.updated_at);
    }

    #[tokio::test]
    async fn test_register_validation() {
        let (service, store) = service();

        let cases = [
            ("", "a@b.com", "pw", "name is required"),
            ("Alice", "no-at-sign", "pw", "invalid email format"),
            ("Alice", "a@b.com", "", "password is required"),
        ];
        for (name, email, password, message) in cases {
            let err = service.register(name, email, password).await.unwrap_err();
            assert!(matches!(err, IdentityError::Validation(_)));
            assert_eq!(err.to_string(), message);
        }
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (service, _) = service();
        service.register("Alice", "a@b.com", "pw").await.unwrap();

        let err = service.register("Other", "a@b.com", "pw2").await.unwrap_err();
        assert!(matches!(err, IdentityError::AlreadyRegistered));
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let (service, _) = service();
        let view = service.register("Alice", "a@b.com", "pw").await.unwrap();

        let token = service.login("a@b.com", "pw").await.unwrap();
        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.id, view.id);
        assert_eq!(claims.name, "Alice");
        assert_eq!(claims.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (service, _) = service();
        service.register("Alice", "a@b.com", "pw").await.unwrap();

        let wrong_password = service.login("a@b.com", "nope").await.unwrap_err();
        let unknown_email = service.login("x@b.com", "pw").await.unwrap_err();

        assert!(matches!(wrong_password, IdentityError::InvalidCredentials));
        assert!(matches!(unknown_email, IdentityError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_verify_garbage_token() {
        let (service, _) = service();
        assert!(matches!(
            service.verify_token("not-a-token"),
            Err(IdentityError::InvalidToken)
        ));
    }
}
