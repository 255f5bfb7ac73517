use serde::{Deserialize, Serialize};

/// Node kinds, in the order the builder emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Milestone,
    Course,
    College,
    Skills,
    Career,
    Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeRef {
    pub name: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineNode {
    /// `m<order>`
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_courses: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colleges: Option<Vec<CollegeRef>>,
    /// 1-based, dense.
    pub order: u32,
}

/// A generated career timeline. Immutable once built; replaced wholesale on regeneration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// RFC 3339 UTC with a `Z` suffix.
    pub generated_at: String,
    /// Rule-set revision that produced the nodes.
    pub version: String,
    pub nodes: Vec<TimelineNode>,
}
