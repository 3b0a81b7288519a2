//! Token issuance and verification.

use chrono::{Duration, Utc};
use common::UserClaims;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Default token lifetime: one hour.
pub const DEFAULT_TTL_SECS: i64 = 3600;

/// Claim set as it appears inside the JWT payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued at (Unix timestamp).
    pub iat: i64,
}

/// Issues and verifies identity tokens with a shared HMAC secret.
///
/// Built once at startup and shared by reference; the secret never changes
/// afterwards, so no locking is involved on the verification path.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Creates a token service with the default one hour lifetime.
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, Duration::seconds(DEFAULT_TTL_SECS))
    }

    /// Creates a token service with a custom lifetime.
    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        // Only the HMAC family is acceptable; anything else in the header is
        // rejected before the signature is even looked at.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Returns the configured token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a signed token for the given user.
    #[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
    pub fn issue(&self, user: &UserClaims) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = TokenClaims {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verifies a token and returns the identity it carries.
    ///
    /// The failure reason is logged at debug level only; callers always see
    /// [`TokenError::Invalid`].
    pub fn verify(&self, token: &str) -> Result<UserClaims, TokenError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| {
                tracing::debug!(reason = ?e.kind(), "token rejected");
                TokenError::Invalid
            },
        )?;

        let claims = data.claims;
        Ok(UserClaims {
            id: claims.id,
            name: claims.name,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    const SECRET: &[u8] = b"test-secret-key-for-testing-only";

    fn user() -> UserClaims {
        UserClaims::new("u-1", "Alice", "alice@example.com")
    }

    fn forge(header: serde_json::Value, payload: serde_json::Value) -> String {
        let h = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header).unwrap());
        let p = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());
        let sig = URL_SAFE_NO_PAD.encode(b"not-a-real-signature");
        format!("{h}.{p}.{sig}")
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let service = TokenService::new(SECRET);
        let token = service.issue(&user()).unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims, user());
    }

    #[test]
    fn test_default_ttl_is_one_hour() {
        let service = TokenService::new(SECRET);
        assert_eq!(service.ttl(), Duration::hours(1));
    }

    #[test]
    fn test_embedded_expiry_matches_ttl() {
        let service = TokenService::new(SECRET);
        let token = service.issue(&user()).unwrap();

        let payload = token.split('.').nth(1).unwrap();
        let raw: TokenClaims =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).unwrap()).unwrap();
        assert_eq!(raw.exp - raw.iat, DEFAULT_TTL_SECS);
        assert_eq!(raw.email, "alice@example.com");
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::with_ttl(SECRET, Duration::seconds(-30));
        let token = service.issue(&user()).unwrap();

        assert!(matches!(service.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_wrong_secret_rejected_every_time() {
        let issuer = TokenService::new(b"some-other-secret");
        let verifier = TokenService::new(SECRET);
        let token = issuer.issue(&user()).unwrap();

        for _ in 0..5 {
            assert!(matches!(verifier.verify(&token), Err(TokenError::Invalid)));
        }
    }

    #[test]
    fn test_non_hmac_algorithm_rejected() {
        let service = TokenService::new(SECRET);
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = forge(
            serde_json::json!({"alg": "RS256", "typ": "JWT"}),
            serde_json::json!({"id": "u-1", "name": "Alice", "email": "alice@example.com", "exp": exp, "iat": 0}),
        );

        assert!(matches!(service.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_unsigned_token_rejected() {
        let service = TokenService::new(SECRET);
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = forge(
            serde_json::json!({"alg": "none", "typ": "JWT"}),
            serde_json::json!({"id": "u-1", "name": "Alice", "email": "alice@example.com", "exp": exp, "iat": 0}),
        );

        assert!(matches!(service.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_garbage_rejected() {
        let service = TokenService::new(SECRET);
        for token in ["", "abc", "a.b.c", "Bearer xyz"] {
            assert!(matches!(service.verify(token), Err(TokenError::Invalid)));
        }
    }

    #[test]
    fn test_error_message_is_uniform() {
        let service = TokenService::new(SECRET);
        let expired = TokenService::with_ttl(SECRET, Duration::seconds(-30))
            .issue(&user())
            .unwrap();

        let a = service.verify(&expired).unwrap_err().to_string();
        let b = service.verify("garbage").unwrap_err().to_string();
        assert_eq!(a, "invalid token");
        assert_eq!(a, b);
    }
}
