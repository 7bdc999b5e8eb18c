//! # Sesamo (User Accounts & Authentication)
//!
//! `sesamo` is the account core of a user service: registration, email
//! ownership confirmation, and sign-in.
//!
//! ## Credentials
//!
//! Passwords are hashed with **Argon2id** (per-call random salt, PHC format)
//! and verified in constant time. The raw password never touches the
//! database.
//!
//! ## Email Verification
//!
//! Registration issues a single-use, expiring verification token tied to the
//! email. At most one token is live per address; re-issuing replaces the old
//! one, and redemption is an atomic consume so a token can never be used
//! twice.
//!
//! ## Sessions
//!
//! Sign-in returns a stateless **HS256 JWT** carrying the account id and an
//! expiry, signed with a process-wide secret loaded once at startup. Nothing
//! is stored server-side; any holder of the secret can verify tokens offline.
//!
//! Unknown emails and wrong passwords produce the same `Invalid credentials`
//! response, and a duplicate signup is indistinguishable from any other
//! creation failure, so neither endpoint can be used to enumerate accounts.

pub mod api;
pub mod auth;
pub mod cli;
pub mod email;
