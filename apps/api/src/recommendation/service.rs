//! Timeline service: read-through cache over the stored profile.
//!
//! Flow: load profile -> return stored timeline unless `force` -> build -> persist.
//! A stored timeline is opaque here and goes back byte-for-byte; only a missing or
//! null `career_timeline` counts as absent.
//! Read-then-write is not atomic; concurrent first-time calls may both build and write.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::catalog::Catalog;
use crate::errors::AppError;
use crate::models::profile::{Profile, CAREER_TIMELINE};
use crate::models::timeline::Timeline;
use crate::recommendation::rules::RuleSet;
use crate::recommendation::timeline::TimelineBuilder;
use crate::store::{DocumentStore, StoreError, PROFILES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineStatus {
    Existing,
    Generated,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineOutcome {
    pub status: TimelineStatus,
    pub career_timeline: Value,
}

/// Returns the stored timeline for `user_id`, or builds and persists a new one
/// when none is stored or `force` is set.
pub async fn get_or_generate_timeline(
    store: &dyn DocumentStore,
    catalog: &Catalog,
    rules: &RuleSet,
    college_limit: usize,
    user_id: &str,
    force: bool,
) -> Result<TimelineOutcome, AppError> {
    let doc = store
        .get_document(PROFILES, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile for user {user_id} not found")))?;

    let mut profile = Profile::from_document(&doc);

    if !force {
        if let Some(existing) = profile.career_timeline.take() {
            return Ok(TimelineOutcome {
                status: TimelineStatus::Existing,
                career_timeline: existing,
            });
        }
    }

    let timeline = TimelineBuilder::new(catalog, rules)
        .with_college_limit(college_limit)
        .build(&profile, Utc::now());
    let node_count = timeline.nodes.len();

    let career_timeline = persist_timeline(store, user_id, &timeline).await?;

    info!("Generated timeline for user {user_id}: {node_count} nodes (force={force})");

    Ok(TimelineOutcome {
        status: TimelineStatus::Generated,
        career_timeline,
    })
}

async fn persist_timeline(
    store: &dyn DocumentStore,
    user_id: &str,
    timeline: &Timeline,
) -> Result<Value, StoreError> {
    let value = serde_json::to_value(timeline)?;
    let mut fields = Map::new();
    fields.insert(CAREER_TIMELINE.to_string(), value.clone());
    store.set_document(PROFILES, user_id, fields, true).await?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;
    use serde_json::json;

    async fn store_with_profile(id: &str, profile: serde_json::Value) -> MemoryDocumentStore {
        let store = MemoryDocumentStore::new();
        store
            .set_document(PROFILES, id, profile.as_object().cloned().unwrap(), true)
            .await
            .unwrap();
        store
    }

    async fn run(store: &MemoryDocumentStore, id: &str, force: bool) -> Result<TimelineOutcome, AppError> {
        get_or_generate_timeline(store, &Catalog::default(), &RuleSet::default(), 5, id, force).await
    }

    #[tokio::test]
    async fn test_first_call_generates_and_persists() {
        let store = store_with_profile("u1", json!({"stream": "Commerce"})).await;

        let outcome = run(&store, "u1", false).await.unwrap();
        assert_eq!(outcome.status, TimelineStatus::Generated);
        assert_eq!(
            outcome.career_timeline["nodes"][1]["suggested_courses"],
            json!(["B.Com", "BBA", "BMS"])
        );

        let stored = store.get_document(PROFILES, "u1").await.unwrap().unwrap();
        assert_eq!(stored["stream"], "Commerce");
        assert_eq!(stored[CAREER_TIMELINE], outcome.career_timeline);
        let persisted: Timeline = serde_json::from_value(stored[CAREER_TIMELINE].clone()).unwrap();
        assert_eq!(persisted.version, "rules-v1");
    }

    #[tokio::test]
    async fn test_second_call_returns_existing_unchanged() {
        let store = store_with_profile("u1", json!({"stream": "Science", "career_interest": "AI"})).await;

        let first = run(&store, "u1", false).await.unwrap();
        let second = run(&store, "u1", false).await.unwrap();
        let third = run(&store, "u1", false).await.unwrap();

        assert_eq!(second.status, TimelineStatus::Existing);
        assert_eq!(second.career_timeline, first.career_timeline);
        assert_eq!(third.career_timeline, first.career_timeline);
    }

    #[tokio::test]
    async fn test_existing_timeline_is_not_recomputed_after_profile_change() {
        let store = store_with_profile("u1", json!({"stream": "Commerce"})).await;
        let first = run(&store, "u1", false).await.unwrap();

        let mut update = Map::new();
        update.insert("stream".to_string(), json!("Arts"));
        store.set_document(PROFILES, "u1", update, true).await.unwrap();

        let cached = run(&store, "u1", false).await.unwrap();
        assert_eq!(cached.career_timeline, first.career_timeline);

        let forced = run(&store, "u1", true).await.unwrap();
        assert_eq!(forced.status, TimelineStatus::Generated);
        assert_eq!(
            forced.career_timeline["nodes"][1]["suggested_courses"][0],
            "BA (Humanities)"
        );

        let after = run(&store, "u1", false).await.unwrap();
        assert_eq!(after.status, TimelineStatus::Existing);
        assert_eq!(after.career_timeline, forced.career_timeline);
    }

    #[tokio::test]
    async fn test_stored_timeline_with_extra_fields_is_returned_unchanged() {
        let stored = json!({
            "generated_at": "2025-01-01T00:00:00Z",
            "version": "rules-v1",
            "generated_by": "admin-reviewed",
            "nodes": [{"id": "m1", "type": "milestone", "title": "T", "description": "D", "order": 1, "note": "keep me"}]
        });
        let store = store_with_profile("u1", json!({"stream": "Science", "career_timeline": stored.clone()})).await;

        let outcome = run(&store, "u1", false).await.unwrap();
        assert_eq!(outcome.status, TimelineStatus::Existing);
        assert_eq!(
            serde_json::to_string(&outcome.career_timeline).unwrap(),
            serde_json::to_string(&stored).unwrap()
        );
    }

    #[tokio::test]
    async fn test_unfamiliar_stored_timeline_is_kept_without_force() {
        let stored = json!({
            "generated_at": "2026-01-01T00:00:00Z",
            "version": "rules-v2",
            "nodes": [{"id": "m1", "type": "internship", "title": "Intern", "description": "", "order": 1}]
        });
        let store = store_with_profile("u1", json!({"career_timeline": stored.clone()})).await;

        let outcome = run(&store, "u1", false).await.unwrap();
        assert_eq!(outcome.status, TimelineStatus::Existing);
        assert_eq!(outcome.career_timeline, stored);

        let persisted = store.get_document(PROFILES, "u1").await.unwrap().unwrap();
        assert_eq!(persisted[CAREER_TIMELINE], stored);
    }

    #[tokio::test]
    async fn test_null_stored_timeline_counts_as_absent() {
        let store = store_with_profile("u1", json!({"career_timeline": null})).await;

        let outcome = run(&store, "u1", false).await.unwrap();
        assert_eq!(outcome.status, TimelineStatus::Generated);
        assert_eq!(outcome.career_timeline["nodes"][0]["type"], "milestone");
    }

    #[tokio::test]
    async fn test_missing_profile_is_not_found() {
        let store = MemoryDocumentStore::new();
        let err = run(&store, "ghost", false).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_profile_still_generates() {
        let store = store_with_profile("u1", json!({})).await;
        let outcome = run(&store, "u1", false).await.unwrap();
        assert_eq!(outcome.career_timeline["nodes"].as_array().unwrap().len(), 5);
    }
}
