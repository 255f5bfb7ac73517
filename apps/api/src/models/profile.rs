use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The closed set of writable profile fields, in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FullName,
    Location,
    DateOfBirth,
    Gender,
    ClassGrade,
    PreviousClassPercentage,
    Stream,
    FavouriteSubject,
    Hobby,
    Skills,
    CareerInterest,
    FinancialCondition,
    ParentsOccupation,
    LanguagePreference,
    Extracurricular,
    LearningStyle,
}

impl ProfileField {
    pub const ALL: [ProfileField; 16] = [
        ProfileField::FullName,
        ProfileField::Location,
        ProfileField::DateOfBirth,
        ProfileField::Gender,
        ProfileField::ClassGrade,
        ProfileField::PreviousClassPercentage,
        ProfileField::Stream,
        ProfileField::FavouriteSubject,
        ProfileField::Hobby,
        ProfileField::Skills,
        ProfileField::CareerInterest,
        ProfileField::FinancialCondition,
        ProfileField::ParentsOccupation,
        ProfileField::LanguagePreference,
        ProfileField::Extracurricular,
        ProfileField::LearningStyle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::FullName => "full_name",
            ProfileField::Location => "location",
            ProfileField::DateOfBirth => "date_of_birth",
            ProfileField::Gender => "gender",
            ProfileField::ClassGrade => "class_grade",
            ProfileField::PreviousClassPercentage => "previous_class_percentage",
            ProfileField::Stream => "stream",
            ProfileField::FavouriteSubject => "favourite_subject",
            ProfileField::Hobby => "hobby",
            ProfileField::Skills => "skills",
            ProfileField::CareerInterest => "career_interest",
            ProfileField::FinancialCondition => "financial_condition",
            ProfileField::ParentsOccupation => "parents_occupation",
            ProfileField::LanguagePreference => "language_preference",
            ProfileField::Extracurricular => "extracurricular",
            ProfileField::LearningStyle => "learning_style",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == key)
    }
}

/// Document key under which the generated timeline is stored.
pub const CAREER_TIMELINE: &str = "career_timeline";

/// Typed view of a stored profile document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub full_name: Option<String>,
    pub location: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub class_grade: Option<String>,
    pub previous_class_percentage: Option<f64>,
    pub stream: Option<String>,
    pub favourite_subject: Option<String>,
    pub hobby: Option<String>,
    pub skills: Option<Vec<String>>,
    pub career_interest: Option<String>,
    pub financial_condition: Option<String>,
    pub parents_occupation: Option<String>,
    pub language_preference: Option<String>,
    pub extracurricular: Option<String>,
    pub learning_style: Option<String>,
    /// Stored timeline, kept verbatim. Only the timeline service writes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_timeline: Option<Value>,
}

impl Profile {
    /// Reads a stored document without ever failing. Values of an unexpected
    /// type read as absent so the recommendation rules fall back to defaults.
    pub fn from_document(doc: &Map<String, Value>) -> Self {
        let text = |field: ProfileField| doc.get(field.as_str()).and_then(scalar_to_string);

        Profile {
            full_name: text(ProfileField::FullName),
            location: text(ProfileField::Location),
            date_of_birth: text(ProfileField::DateOfBirth),
            gender: text(ProfileField::Gender),
            class_grade: text(ProfileField::ClassGrade),
            previous_class_percentage: doc
                .get(ProfileField::PreviousClassPercentage.as_str())
                .and_then(percentage_from_value),
            stream: text(ProfileField::Stream),
            favourite_subject: text(ProfileField::FavouriteSubject),
            hobby: text(ProfileField::Hobby),
            skills: doc
                .get(ProfileField::Skills.as_str())
                .and_then(skills_from_value),
            career_interest: text(ProfileField::CareerInterest),
            financial_condition: text(ProfileField::FinancialCondition),
            parents_occupation: text(ProfileField::ParentsOccupation),
            language_preference: text(ProfileField::LanguagePreference),
            extracurricular: text(ProfileField::Extracurricular),
            learning_style: text(ProfileField::LearningStyle),
            career_timeline: doc
                .get(CAREER_TIMELINE)
                .filter(|v| !v.is_null())
                .cloned(),
        }
    }
}

/// Strings are trimmed; numbers and booleans are rendered; everything else is absent.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Splits a comma-separated skills string into trimmed, non-empty entries.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accepts either a list or a comma-separated string.
pub fn skills_from_value(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(s) => Some(split_skills(s)),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        _ => None,
    }
}

pub fn percentage_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}
