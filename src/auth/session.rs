//! Signed session token issuance.
//!
//! Sessions are stateless: nothing is stored server-side. A token is an
//! HS256 JWT carrying the account id and an expiry, signed with the
//! process-wide secret loaded once at startup. Verification is standard JWT
//! validation and happens in the request-authorization layer, not here.

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::error::AuthError;
use crate::auth::state::AuthConfig;

/// Claims embedded in a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Account id.
    pub sub: Uuid,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Sign a fresh session token for `account_id`.
///
/// # Errors
/// `AuthError::Crypto` if signing fails.
pub fn issue(account_id: Uuid, config: &AuthConfig) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: account_id,
        iat: now,
        exp: now + config.session_ttl_seconds(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.signing_secret().expose_secret().as_bytes()),
    )
    .map_err(|err| AuthError::Crypto(anyhow!("failed to sign session token: {err}")))
}
