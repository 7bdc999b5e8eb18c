//! Email verification endpoint.

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, instrument};
use utoipa::IntoParams;

use crate::auth::{AuthError, AuthService};

#[derive(IntoParams, Debug, Deserialize)]
#[into_params(parameter_in = Query)]
pub struct VerifyEmailArgs {
    /// Token from the verification link.
    token: String,
}

#[utoipa::path(
    get,
    path = "/verify-email",
    params(VerifyEmailArgs),
    responses (
        (status = 200, description = "Token verified and invalidated"),
        (status = 400, description = "Missing token or token expired"),
        (status = 401, description = "Invalid token"),
        (status = 500, description = "Storage failure")
    ),
    tag = "accounts"
)]
#[instrument(skip(service, query))]
pub async fn verify_email(
    service: Extension<AuthService>,
    query: Result<Query<VerifyEmailArgs>, QueryRejection>,
) -> impl IntoResponse {
    let Ok(Query(args)) = query else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Missing token"})),
        );
    };

    let token = args.token.trim();
    if token.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Missing token"})),
        );
    }

    match service.verify_email(token).await {
        Ok(_email) => (
            StatusCode::OK,
            Json(json!({"message": "Token verified and invalidated successfully"})),
        ),
        Err(AuthError::InvalidToken) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid token"})),
        ),
        Err(AuthError::ExpiredToken) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Token expired"})),
        ),
        Err(err) => {
            error!("Failed to verify token: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Error verifying token"})),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthConfig;
    use crate::email::LogEmailSender;
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use std::sync::Arc;

    fn service() -> AuthService {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost/postgres")
            .expect("lazy pool");
        let config = AuthConfig::new(
            SecretString::from("test-secret".to_string()),
            "http://localhost:3000".to_string(),
        );
        AuthService::new(pool, config, Arc::new(LogEmailSender))
    }

    #[tokio::test]
    async fn empty_token_is_rejected() {
        let response = verify_email(
            Extension(service()),
            Ok(Query(VerifyEmailArgs {
                token: "  ".to_string(),
            })),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
