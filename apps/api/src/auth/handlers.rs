//! Axum route handlers for signup and login.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::profile::normalize::profile_template;
use crate::state::AppState;
use crate::store::PROFILES;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Fixed account id used by the prototype login bypass.
pub const TEST_USER_ID: &str = "test_user_local";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub user_id: String,
    pub access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
    pub profile: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct TestLoginResponse {
    pub message: String,
    pub user_id: String,
    pub profile: Map<String, Value>,
}

/// Trimmed, lowercased email plus password; both must be present.
fn credentials<'a>(
    email: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(String, &'a str), AppError> {
    let email = email.map(|e| e.trim().to_lowercase()).unwrap_or_default();
    let password = password.unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_string(),
        ));
    }
    Ok((email, password))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /signup
///
/// Creates the account, writes a blank profile, then signs in for a token.
/// A failed follow-up sign-in is not fatal: the token comes back as null.
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, AppError> {
    let (email, password) = credentials(request.email.as_deref(), request.password.as_deref())?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let user_id = state.identity.create_account(&email, password).await?;
    info!("Created account {user_id}");

    let full_name = request.full_name.as_deref().unwrap_or_default();
    state
        .store
        .set_document(PROFILES, &user_id, profile_template(full_name), true)
        .await?;

    let access_token = match state.identity.sign_in(&email, password).await {
        Ok(session) => Some(session.id_token),
        Err(e) => {
            warn!("Sign-in after signup failed for {user_id}: {e}");
            None
        }
    };

    Ok(Json(SignupResponse {
        message: "Signup successful".to_string(),
        user_id,
        access_token,
    }))
}

/// POST /login
///
/// Signs in and returns tokens with the stored profile. A profile read failure
/// degrades to an empty profile rather than failing the login.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (email, password) = credentials(request.email.as_deref(), request.password.as_deref())?;

    let session = state.identity.sign_in(&email, password).await?;

    let profile = match state.store.get_document(PROFILES, &session.account_id).await {
        Ok(doc) => doc.unwrap_or_default(),
        Err(e) => {
            warn!("Profile read failed for {}: {e}", session.account_id);
            Map::new()
        }
    };

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user_id: session.account_id,
        access_token: session.id_token,
        refresh_token: session.refresh_token,
        profile,
    }))
}

/// GET /login-test
///
/// Prototype bypass: seeds a fixed demo profile once and returns it.
/// Only routed when ENABLE_TEST_LOGIN is set.
pub async fn handle_login_test(
    State(state): State<AppState>,
) -> Result<Json<TestLoginResponse>, AppError> {
    let profile = demo_profile();

    if state
        .store
        .get_document(PROFILES, TEST_USER_ID)
        .await?
        .is_none()
    {
        state
            .store
            .set_document(PROFILES, TEST_USER_ID, profile.clone(), false)
            .await?;
        info!("Seeded demo profile {TEST_USER_ID}");
    }

    Ok(Json(TestLoginResponse {
        message: "Test login successful".to_string(),
        user_id: TEST_USER_ID.to_string(),
        profile,
    }))
}

fn demo_profile() -> Map<String, Value> {
    let profile = json!({
        "full_name": "Test User",
        "location": "Test City",
        "date_of_birth": "2000-01-01",
        "gender": "Other",
        "class_grade": "12th",
        "previous_class_percentage": 88,
        "stream": "Science",
        "favourite_subject": "Maths",
        "hobby": "Coding",
        "skills": ["python", "electronics"],
        "career_interest": "AI",
        "financial_condition": "middle",
        "parents_occupation": "Engineer",
        "language_preference": "English",
        "extracurricular": "Robotics",
        "learning_style": "Visual"
    });
    match profile {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
