//! Password hashing.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, SaltString};

/// One-way, salted password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password into a self-describing PHC string.
    fn hash(&self, password: &str) -> Result<String, password_hash::Error>;

    /// Checks a plaintext password against a stored hash.
    ///
    /// Returns false for malformed hashes as well as mismatches.
    fn verify(&self, hash: &str, password: &str) -> bool;
}

/// Argon2id with the crate's default cost parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, password_hash::Error> {
        use argon2::password_hash::PasswordHasher as _;

        let salt = SaltString::generate(&mut OsRng);
        Ok(Argon2::default()
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    }

    fn verify(&self, hash: &str, password: &str) -> bool {
        use argon2::password_hash::PasswordVerifier as _;

        // Digest comparison inside argon2 is constant-time.
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}
