use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A college in the reference catalog. Identity is its position in the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeEntry {
    pub name: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub programs: Vec<Program>,
}

/// An offered program. Only `name` takes part in matching; the rest is carried through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub name: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEntry {
    pub name: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerEntry {
    #[serde(alias = "title")]
    pub name: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}
