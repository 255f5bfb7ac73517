use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::errors::AppError;
use crate::profile::normalize::normalize_update;
use crate::state::AppState;
use crate::store::PROFILES;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Option<String>,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub profile: Map<String, Value>,
}

#[derive(Serialize)]
pub struct UpdateProfileResponse {
    pub message: String,
    pub updated_fields: Vec<String>,
    pub rejected_fields: Vec<String>,
}

pub(crate) fn require_user_id(raw: Option<&str>) -> Result<&str, AppError> {
    raw.map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation("user_id is required".to_string()))
}

/// GET /profile?user_id=
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user_id = require_user_id(params.user_id.as_deref())?;
    let profile = state
        .store
        .get_document(PROFILES, user_id)
        .await?
        .unwrap_or_default();
    Ok(Json(ProfileResponse { profile }))
}

/// POST /update-profile
///
/// Merge-writes the recognised profile fields; unknown keys are reported back, not stored.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<UpdateProfileResponse>, AppError> {
    let user_id = require_user_id(payload.get("user_id").and_then(Value::as_str))?.to_string();

    let update = normalize_update(&payload)?;
    if update.fields.is_empty() {
        return Err(AppError::Validation(
            "No valid profile fields provided".to_string(),
        ));
    }

    let updated_fields: Vec<String> = update.fields.keys().cloned().collect();
    state
        .store
        .set_document(PROFILES, &user_id, update.fields, true)
        .await?;

    info!(
        "Updated profile for user {user_id}: {} fields",
        updated_fields.len()
    );

    Ok(Json(UpdateProfileResponse {
        message: "Profile updated successfully".to_string(),
        updated_fields,
        rejected_fields: update.rejected_fields,
    }))
}
