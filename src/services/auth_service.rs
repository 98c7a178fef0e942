//! Domain service for registration and bearer-token authentication.
//!
//! Handles account creation, password checks, and the token lifecycle
//! (issue, revoke, resolve).

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::db::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Registration input. Presence of each field is checked by the caller.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// A token handed to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub token_expiration: DateTime<Utc>,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a user with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Conflict`] if the username or email is taken.
    async fn register(&self, new_user: NewUser) -> Result<User, AuthError>;

    /// Checks a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown user or a wrong password.
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Returns the user's current token if it stays valid past the reuse
    /// threshold, otherwise rotates to a fresh one.
    async fn issue_token(&self, user: &User) -> Result<IssuedToken, AuthError>;

    /// Expires the user's token without clearing it.
    async fn revoke_token(&self, user: &User) -> Result<(), AuthError>;

    /// Resolves a bearer token to its user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] if the token is unknown or expired.
    async fn resolve_token(&self, token: &str) -> Result<User, AuthError>;
}
