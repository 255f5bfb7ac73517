//! Axum route handlers for the career timeline.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::profile::handlers::require_user_id;
use crate::recommendation::service::{get_or_generate_timeline, TimelineOutcome};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TimelineRequest {
    #[serde(default, alias = "account_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub force: bool,
}

/// POST /career-timeline
///
/// Returns the stored timeline, or generates one when absent or `force` is set.
pub async fn handle_career_timeline(
    State(state): State<AppState>,
    Json(request): Json<TimelineRequest>,
) -> Result<Json<TimelineOutcome>, AppError> {
    let user_id = require_user_id(request.user_id.as_deref())?;

    let outcome = get_or_generate_timeline(
        state.store.as_ref(),
        &state.catalog,
        &state.rules,
        state.config.college_match_limit,
        user_id,
        request.force,
    )
    .await?;

    Ok(Json(outcome))
}
