//! Durable account storage.

use sqlx::PgPool;
use tracing::{debug, Instrument};

use crate::auth::account::Account;
use crate::auth::error::AuthError;

pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account, relying on the `accounts.email` unique
    /// constraint for atomicity. Two concurrent inserts with the same email
    /// race in the database; the loser gets `DuplicateEmail`, never a second
    /// row.
    ///
    /// # Errors
    /// `AuthError::DuplicateEmail` if the email is taken, `AuthError::Storage`
    /// on any other database failure.
    pub async fn create(
        pool: &PgPool,
        full_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Account, AuthError> {
        let query = r"
            INSERT INTO accounts (full_name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, full_name, email, password_hash, avatar_url, created_at
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        match sqlx::query_as::<_, Account>(query)
            .bind(full_name)
            .bind(email)
            .bind(password_hash)
            .fetch_one(pool)
            .instrument(span)
            .await
        {
            Ok(account) => Ok(account),
            Err(err) if is_unique_violation(&err) => {
                debug!("account insert hit unique constraint");
                Err(AuthError::DuplicateEmail)
            }
            Err(err) => Err(AuthError::Storage(err)),
        }
    }

    /// Look up an account by its normalized email.
    ///
    /// # Errors
    /// `AuthError::NotFound` when no row matches, `AuthError::Storage` on
    /// database failure.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Account, AuthError> {
        let query = r"
            SELECT id, full_name, email, password_hash, avatar_url, created_at
            FROM accounts
            WHERE email = $1
        ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        sqlx::query_as::<_, Account>(query)
            .bind(email)
            .fetch_optional(pool)
            .instrument(span)
            .await
            .map_err(AuthError::Storage)?
            .ok_or(AuthError::NotFound)
    }
}

/// SQLSTATE 23505: unique constraint violated.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct TestDbError {
        code: Option<&'static str>,
    }

    impl fmt::Display for TestDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "test database error")
        }
    }

    impl StdError for TestDbError {}

    impl DatabaseError for TestDbError {
        fn message(&self) -> &'static str {
            "test database error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            self.code.map(Cow::Borrowed)
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::UniqueViolation
        }
    }

    #[test]
    fn is_unique_violation_matches_sqlstate() {
        let err = sqlx::Error::Database(Box::new(TestDbError {
            code: Some("23505"),
        }));
        assert!(is_unique_violation(&err));

        let err = sqlx::Error::Database(Box::new(TestDbError {
            code: Some("99999"),
        }));
        assert!(!is_unique_violation(&err));

        let err = sqlx::Error::RowNotFound;
        assert!(!is_unique_violation(&err));
    }
}
