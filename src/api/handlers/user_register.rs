//! Account registration endpoint.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

use super::{normalize_email, valid_email};
use crate::auth::{AuthError, AuthService, NewAccount};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignUp {
    full_name: String,
    email: String,
    password: String,
}

#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignUp,
    responses (
        (status = 200, description = "Account registered, verification email dispatched"),
        (status = 400, description = "Invalid payload or account could not be created"),
        (status = 500, description = "Storage failure")
    ),
    tag = "accounts"
)]
#[instrument(skip(service, payload))]
pub async fn register(
    service: Extension<AuthService>,
    payload: Option<Json<SignUp>>,
) -> impl IntoResponse {
    let Some(Json(input)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Missing payload"})),
        );
    };

    let full_name = input.full_name.trim().to_string();
    if full_name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Name cannot be empty"})),
        );
    }

    let email = normalize_email(&input.email);
    if !valid_email(&email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid email"})),
        );
    }

    if input.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Password cannot be empty"})),
        );
    }

    match service
        .register(NewAccount {
            full_name,
            email,
            password: input.password,
        })
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"message": "Account registered successfully"})),
        ),
        // Deliberately indistinguishable from other creation failures so the
        // endpoint cannot be used to probe which emails have accounts.
        Err(AuthError::DuplicateEmail) => {
            debug!("signup collided with an existing email");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Error creating account"})),
            )
        }
        Err(err) => {
            error!("Failed to register account: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Error creating account"})),
            )
        }
    }
}
