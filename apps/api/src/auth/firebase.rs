//! Identity Toolkit REST client (Firebase Auth).
//!
//! Both calls post `{email, password, returnSecureToken}` to
//! `{base}/accounts:<method>?key=<web api key>`. Provider error bodies look like
//! `{"error": {"message": "EMAIL_EXISTS"}}` and are classified into `AuthError`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{AuthError, IdentityProvider, Session};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

const CREDENTIAL_ERRORS: &[&str] = &[
    "EMAIL_NOT_FOUND",
    "INVALID_PASSWORD",
    "INVALID_LOGIN_CREDENTIALS",
    "USER_DISABLED",
    "INVALID_EMAIL",
    "MISSING_PASSWORD",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    id_token: String,
    #[serde(default)]
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct FirebaseIdentity {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl FirebaseIdentity {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, AuthError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self, method: &str) -> Result<String, AuthError> {
        let key = self.api_key.as_deref().ok_or(AuthError::NotConfigured)?;
        Ok(format!("{}/accounts:{method}?key={key}", self.base_url))
    }

    async fn post_credentials(
        &self,
        method: &str,
        email: &str,
        password: &str,
    ) -> Result<AccountResponse, AuthError> {
        let url = self.endpoint(method)?;
        let response = self
            .client
            .post(&url)
            .json(&CredentialsRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = classify_error(status.as_u16(), &body);
            warn!("Identity provider {method} failed: {err}");
            return Err(err);
        }

        let account: AccountResponse = response.json().await?;
        debug!("Identity provider {method} succeeded for account {}", account.local_id);
        Ok(account)
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    async fn create_account(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let account = self.post_credentials("signUp", email, password).await?;
        Ok(account.local_id)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let account = self
            .post_credentials("signInWithPassword", email, password)
            .await?;
        Ok(Session {
            id_token: account.id_token,
            refresh_token: account.refresh_token,
            account_id: account.local_id,
        })
    }
}

/// Maps a non-2xx provider response to an `AuthError`.
fn classify_error(status: u16, body: &str) -> AuthError {
    let message = serde_json::from_str::<ProviderError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());

    // Messages can carry a suffix, e.g. "WEAK_PASSWORD : Password should be at least 6 characters"
    let code = message.split(':').next().unwrap_or("").trim();

    if code == "EMAIL_EXISTS" {
        AuthError::EmailExists
    } else if CREDENTIAL_ERRORS.contains(&code) {
        AuthError::InvalidCredentials(code.to_string())
    } else {
        AuthError::Provider { status, message }
    }
}
