//! Sign-in endpoint.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, instrument};
use utoipa::ToSchema;

use super::{normalize_email, valid_email};
use crate::auth::{AuthError, AuthService, Credentials};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignIn {
    email: String,
    password: String,
}

#[utoipa::path(
    post,
    path = "/signin",
    request_body = SignIn,
    responses (
        (status = 200, description = "Signed session token issued"),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Invalid credentials"),
        (status = 500, description = "Storage failure")
    ),
    tag = "accounts"
)]
#[instrument(skip(service, payload))]
pub async fn login(
    service: Extension<AuthService>,
    payload: Option<Json<SignIn>>,
) -> impl IntoResponse {
    let Some(Json(input)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Missing payload"})),
        );
    };

    let email = normalize_email(&input.email);
    if !valid_email(&email) || input.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid payload"})),
        );
    }

    match service
        .authenticate(Credentials {
            email,
            password: input.password,
        })
        .await
    {
        Ok(token) => (StatusCode::OK, Json(json!({"token": token}))),
        // Unknown email and wrong password share one response on purpose.
        Err(AuthError::InvalidCredentials) => (
            StatusCode::FORBIDDEN,
            Json(json!({"error": "Invalid credentials"})),
        ),
        Err(err) => {
            error!("Failed to sign in: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Error signing in"})),
            )
        }
    }
}
