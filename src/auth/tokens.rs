//! Single-use, expiring email-verification tokens.
//!
//! The store holds at most one live token per email: issuing a new one
//! replaces the previous token for that address. Consumption is a single
//! atomic delete, so a token can only ever be redeemed once; concurrent
//! consumers race in the database and the loser sees `InvalidToken`.

use anyhow::anyhow;
use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use sqlx::{PgPool, Row};
use tracing::Instrument;

use crate::auth::error::AuthError;

const TOKEN_BYTES: usize = 32;

pub struct TokenStore;

impl TokenStore {
    /// Issue a fresh verification token for `email`, valid for `ttl_seconds`.
    ///
    /// Any prior live token for the same email is replaced; the old token
    /// becomes invalid the moment this returns.
    ///
    /// # Errors
    /// `AuthError::Crypto` if random generation fails, `AuthError::Storage`
    /// on database failure.
    pub async fn issue(pool: &PgPool, email: &str, ttl_seconds: i64) -> Result<String, AuthError> {
        let token = generate_token()?;
        let expires_at = Utc::now() + Duration::seconds(ttl_seconds);

        let query = r"
            INSERT INTO verification_tokens (token, email, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE
            SET token = EXCLUDED.token, expires_at = EXCLUDED.expires_at
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        sqlx::query(query)
            .bind(&token)
            .bind(email)
            .bind(expires_at)
            .execute(pool)
            .instrument(span)
            .await
            .map_err(AuthError::Storage)?;

        Ok(token)
    }

    /// Atomically look up and invalidate a token, returning its email.
    ///
    /// The delete-returning statement is the only lookup, so two concurrent
    /// calls with the same token cannot both succeed. An expired token is
    /// removed by this call but reported as `ExpiredToken`; it is never
    /// reported valid. The expiry comparison uses one clock read.
    ///
    /// # Errors
    /// `AuthError::InvalidToken` if the token is unknown or already consumed,
    /// `AuthError::ExpiredToken` if it was past its expiry,
    /// `AuthError::Storage` on database failure.
    pub async fn consume(pool: &PgPool, token: &str) -> Result<String, AuthError> {
        let query = r"
            DELETE FROM verification_tokens
            WHERE token = $1
            RETURNING email, expires_at
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "DELETE",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(token)
            .fetch_optional(pool)
            .instrument(span)
            .await
            .map_err(AuthError::Storage)?;

        let Some(row) = row else {
            return Err(AuthError::InvalidToken);
        };

        let email: String = row.get("email");
        let expires_at: DateTime<Utc> = row.get("expires_at");
        if is_expired(expires_at, Utc::now()) {
            return Err(AuthError::ExpiredToken);
        }

        Ok(email)
    }
}

fn is_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expires_at < now
}

/// 32 random bytes, URL-safe base64 without padding. Unguessable and safe to
/// embed in a verification link.
fn generate_token() -> Result<String, AuthError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|err| AuthError::Crypto(anyhow!("failed to generate token: {err}")))?;
    Ok(Base64UrlUnpadded::encode_string(&bytes))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_decode_to_token_bytes() {
        let token = generate_token().unwrap();
        let decoded = Base64UrlUnpadded::decode_vec(&token).unwrap();
        assert_eq!(decoded.len(), TOKEN_BYTES);
    }

    #[test]
    fn generated_tokens_are_unique() {
        let first = generate_token().unwrap();
        let second = generate_token().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn expiry_comparison_is_strict() {
        let now = Utc::now();
        assert!(is_expired(now - Duration::seconds(1), now));
        assert!(!is_expired(now + Duration::seconds(1), now));
        assert!(!is_expired(now, now));
    }
}
