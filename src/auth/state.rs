//! Process-wide authentication configuration.

use secrecy::SecretString;

const DEFAULT_TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;
const DEFAULT_SESSION_TTL_SECONDS: i64 = 24 * 60 * 60;

/// Read-only configuration shared by all requests: the session signing
/// secret, token/session lifetimes, and the frontend base URL used to build
/// verification links. Constructed once at startup and passed by reference;
/// there are no ambient globals.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    signing_secret: SecretString,
    token_ttl_seconds: i64,
    session_ttl_seconds: i64,
    frontend_base_url: String,
}

impl AuthConfig {
    #[must_use]
    pub fn new(signing_secret: SecretString, frontend_base_url: String) -> Self {
        Self {
            signing_secret,
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            frontend_base_url,
        }
    }

    #[must_use]
    pub fn with_token_ttl_seconds(mut self, seconds: i64) -> Self {
        self.token_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn signing_secret(&self) -> &SecretString {
        &self.signing_secret
    }

    #[must_use]
    pub const fn token_ttl_seconds(&self) -> i64 {
        self.token_ttl_seconds
    }

    #[must_use]
    pub const fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }
}
