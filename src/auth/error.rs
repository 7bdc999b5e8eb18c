//! Error taxonomy for the account and credential flows.
//!
//! Domain variants map 1:1 to client-facing responses in the handlers.
//! `Storage` and `Crypto` carry the underlying failure for the logs and are
//! only ever surfaced to clients as a generic 500.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// An account with the same email already exists.
    #[error("account already exists")]
    DuplicateEmail,

    /// No account matches the lookup.
    #[error("account not found")]
    NotFound,

    /// Email/password pair did not match. Deliberately does not say which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Verification token unknown or already consumed.
    #[error("invalid token")]
    InvalidToken,

    /// Verification token found but past its expiry.
    #[error("token expired")]
    ExpiredToken,

    /// Underlying persistence failure.
    #[error("storage failure: {0}")]
    Storage(#[from] sqlx::Error),

    /// Cryptographic primitive failure. Not retried.
    #[error("crypto failure: {0}")]
    Crypto(#[source] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_have_stable_messages() {
        assert_eq!(AuthError::DuplicateEmail.to_string(), "account already exists");
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "invalid credentials"
        );
        assert_eq!(AuthError::InvalidToken.to_string(), "invalid token");
        assert_eq!(AuthError::ExpiredToken.to_string(), "token expired");
    }

    #[test]
    fn storage_error_wraps_sqlx() {
        let err = AuthError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AuthError::Storage(_)));
    }
}
