//! Password hashing and verification with Argon2id.
//!
//! Each hash embeds a fresh random salt and the Argon2 parameters, so two
//! hashes of the same password differ while both verify.

use anyhow::anyhow;
use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

use crate::auth::error::AuthError;

/// Hash a password with Argon2id and a per-call random salt.
///
/// The returned string is in PHC format and contains everything `verify`
/// needs. The plaintext is guaranteed non-empty by the request boundary and
/// is not re-checked here.
///
/// # Errors
/// Returns `AuthError::Crypto` if the hashing primitive itself fails.
pub fn hash(plaintext: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthError::Crypto(anyhow!("failed to hash password: {err}")))
}

/// Verify a password against a stored PHC hash in constant time.
///
/// A malformed stored hash is treated as a mismatch, never an error.
#[must_use]
pub fn verify(plaintext: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hashed = hash("secret1").unwrap();
        assert!(verify("secret1", &hashed));
        assert!(!verify("secret2", &hashed));
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash("secret1").unwrap();
        let second = hash("secret1").unwrap();
        assert_ne!(first, second);
        assert!(verify("secret1", &first));
        assert!(verify("secret1", &second));
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        assert!(!verify("secret1", "not-a-phc-hash"));
        assert!(!verify("secret1", ""));
    }
}
