//! OpenAPI document for the account endpoints.

use utoipa::OpenApi;

use crate::api::handlers;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::user_register::register,
        handlers::verify_email::verify_email,
        handlers::user_login::login,
    ),
    components(schemas(
        handlers::health::Health,
        handlers::user_register::SignUp,
        handlers::user_login::SignIn,
    )),
    tags(
        (name = "accounts", description = "Registration, email verification, and sign-in"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_all_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|path| path.as_str() == "/signup"));
        assert!(paths.iter().any(|path| path.as_str() == "/verify-email"));
        assert!(paths.iter().any(|path| path.as_str() == "/signin"));
        assert!(paths.iter().any(|path| path.as_str() == "/health"));
    }
}
