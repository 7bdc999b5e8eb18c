//! Registration, email verification, and sign-in flows.

use anyhow::anyhow;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, error};

use crate::auth::error::AuthError;
use crate::auth::repo::AccountRepo;
use crate::auth::state::AuthConfig;
use crate::auth::tokens::TokenStore;
use crate::auth::{password, session};
use crate::email::{build_verify_url, verification_message, EmailSender};

/// Registration input. Shape validation (non-empty fields, email format,
/// normalization) happens at the request boundary; this struct is already
/// valid.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Sign-in input, validated and normalized at the request boundary.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Composes the hasher, repositories, token store, and session issuer into
/// the user-facing account operations. Holds no per-request state; every
/// request runs independently against the shared pool and configuration.
#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    config: Arc<AuthConfig>,
    notifier: Arc<dyn EmailSender>,
}

impl AuthService {
    #[must_use]
    pub fn new(pool: PgPool, config: AuthConfig, notifier: Arc<dyn EmailSender>) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            notifier,
        }
    }

    /// Create an account and issue a verification token for its email.
    ///
    /// The password is hashed before the single insert, so a failure at any
    /// point leaves no partial account behind. The verification email is
    /// dispatched fire-and-forget: a notifier failure never rolls back or
    /// fails the registration.
    ///
    /// # Errors
    /// `AuthError::DuplicateEmail` if the email is taken; `Storage`/`Crypto`
    /// on infrastructure failure.
    pub async fn register(&self, input: NewAccount) -> Result<(), AuthError> {
        // Hashing is deliberately expensive; keep it off the async workers.
        let password = input.password;
        let password_hash = tokio::task::spawn_blocking(move || password::hash(&password))
            .await
            .map_err(|err| AuthError::Crypto(anyhow!("hashing task failed: {err}")))??;

        let account =
            AccountRepo::create(&self.pool, &input.full_name, &input.email, &password_hash).await?;

        let token =
            TokenStore::issue(&self.pool, &account.email, self.config.token_ttl_seconds()).await?;

        self.dispatch_verification(&account.email, &token);

        Ok(())
    }

    /// Redeem a verification token, returning the email it was issued for.
    ///
    /// # Errors
    /// `AuthError::InvalidToken` if unknown or already consumed,
    /// `AuthError::ExpiredToken` if past expiry, `Storage` on failure.
    pub async fn verify_email(&self, token: &str) -> Result<String, AuthError> {
        TokenStore::consume(&self.pool, token).await
    }

    /// Check credentials and issue a signed session token.
    ///
    /// An unknown email and a wrong password both come back as
    /// `InvalidCredentials`; nothing distinguishes the two.
    ///
    /// # Errors
    /// `AuthError::InvalidCredentials` on mismatch; `Storage`/`Crypto` on
    /// infrastructure failure.
    pub async fn authenticate(&self, credentials: Credentials) -> Result<String, AuthError> {
        let account = match AccountRepo::find_by_email(&self.pool, &credentials.email).await {
            Ok(account) => account,
            Err(AuthError::NotFound) => return Err(AuthError::InvalidCredentials),
            Err(err) => return Err(err),
        };

        let password = credentials.password;
        let stored_hash = account.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || password::verify(&password, &stored_hash))
            .await
            .map_err(|err| AuthError::Crypto(anyhow!("verification task failed: {err}")))?;

        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        session::issue(account.id, &self.config)
    }

    fn dispatch_verification(&self, email: &str, token: &str) {
        let verify_url = build_verify_url(self.config.frontend_base_url(), token);
        let message = match verification_message(email, &verify_url) {
            Ok(message) => message,
            Err(err) => {
                error!("Failed to build verification email: {err:?}");
                return;
            }
        };
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            match notifier.send(&message) {
                Ok(()) => debug!(to_email = %message.to_email, "verification email dispatched"),
                Err(err) => error!("Failed to send verification email: {err:?}"),
            }
        });
    }
}
