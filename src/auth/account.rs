//! Account model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow, Row};
use uuid::Uuid;

/// A registered account.
///
/// `email` is stored trimmed and lowercased by the request boundary, so the
/// database uniqueness constraint is effectively case-insensitive. Accounts
/// are never mutated or deleted here; `avatar_url` exists in the schema but
/// is not set by any of these flows.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for Account {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            avatar_url: row.try_get("avatar_url")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serialization_never_includes_the_password_hash() {
        let account = Account {
            id: Uuid::nil(),
            full_name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string(),
            avatar_url: None,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&account).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(
            value.get("email").and_then(serde_json::Value::as_str),
            Some("alice@example.com")
        );
    }
}
