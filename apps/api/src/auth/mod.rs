//! Identity provider seam. Account creation and password sign-in are delegated;
//! this service never stores credentials.

pub mod firebase;
pub mod handlers;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub use firebase::FirebaseIdentity;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("an account with this email already exists")]
    EmailExists,

    #[error("provider error (status {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("identity provider API key is not configured")]
    NotConfigured,
}

/// Tokens returned by a successful password sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id_token: String,
    pub refresh_token: String,
    pub account_id: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates an account and returns its id.
    async fn create_account(&self, email: &str, password: &str) -> Result<String, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;
}
