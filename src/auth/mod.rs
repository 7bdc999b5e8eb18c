//! Account registration, credential verification, and session issuance.
//!
//! The pieces compose left to right: passwords are hashed with Argon2id
//! (`password`), accounts persist behind a unique-email constraint (`repo`),
//! email ownership is proven by single-use expiring tokens (`tokens`), and a
//! successful sign-in yields a stateless signed session token (`session`).
//! `AuthService` wires them into the three user-facing operations.

pub mod account;
pub mod error;
pub mod password;
pub mod repo;
pub mod service;
pub mod session;
pub mod state;
pub mod tokens;

pub use account::Account;
pub use error::AuthError;
pub use service::{AuthService, Credentials, NewAccount};
pub use state::AuthConfig;
