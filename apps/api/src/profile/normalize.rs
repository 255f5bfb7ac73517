use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::models::profile::{percentage_from_value, skills_from_value, ProfileField};

/// Request keys that identify the caller rather than carry profile data.
const REQUEST_KEYS: &[&str] = &["user_id"];

/// A profile write after validation: only schema fields, already coerced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizedUpdate {
    pub fields: Map<String, Value>,
    /// Keys present in the payload that are not profile fields. Never written.
    pub rejected_fields: Vec<String>,
}

/// A brand-new profile document: every field present, all but `full_name` null.
pub fn profile_template(full_name: &str) -> Map<String, Value> {
    ProfileField::ALL
        .iter()
        .map(|field| {
            let value = match field {
                ProfileField::FullName => Value::String(full_name.trim().to_string()),
                _ => Value::Null,
            };
            (field.as_str().to_string(), value)
        })
        .collect()
}

/// Filters a raw update payload down to profile fields and coerces each value.
///
/// - `skills`: list or comma-separated string -> trimmed non-empty strings
/// - `previous_class_percentage`: number, numeric string, or empty -> null
/// - other fields: trimmed strings; numbers and booleans are stringified
/// - `null` is kept so a caller can clear a field
pub fn normalize_update(payload: &Map<String, Value>) -> Result<NormalizedUpdate, AppError> {
    let mut update = NormalizedUpdate::default();

    for (key, value) in payload {
        let Some(field) = ProfileField::parse(key) else {
            if !REQUEST_KEYS.contains(&key.as_str()) {
                update.rejected_fields.push(key.clone());
            }
            continue;
        };

        let normalized = match field {
            ProfileField::Skills => normalize_skills(value)?,
            ProfileField::PreviousClassPercentage => normalize_percentage(value)?,
            _ => normalize_text(field, value)?,
        };
        update.fields.insert(key.clone(), normalized);
    }

    update.rejected_fields.sort();
    Ok(update)
}

fn normalize_skills(value: &Value) -> Result<Value, AppError> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    let skills = skills_from_value(value).ok_or_else(|| {
        AppError::Validation("skills must be a list or a comma-separated string".to_string())
    })?;
    Ok(Value::from(skills))
}

fn normalize_percentage(value: &Value) -> Result<Value, AppError> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::String(s) if s.trim().is_empty() => Ok(Value::Null),
        other => percentage_from_value(other)
            .map(Value::from)
            .ok_or_else(|| {
                AppError::Validation("previous_class_percentage must be a number".to_string())
            }),
    }
}

fn normalize_text(field: ProfileField, value: &Value) -> Result<Value, AppError> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::String(s) => Ok(Value::String(s.trim().to_string())),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        _ => Err(AppError::Validation(format!(
            "{} must be a text value",
            field.as_str()
        ))),
    }
}
