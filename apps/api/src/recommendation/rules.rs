//! Course suggestion rules: an ordered decision table over
//! (stream, favourite_subject, career_interest).
//!
//! Rules are evaluated top to bottom and the first match wins. The table ends
//! with an always-true fallback, so every profile gets a non-empty suggestion.

use serde::{Deserialize, Serialize};

use crate::models::profile::Profile;

/// Lowercased rule inputs. Absent fields read as "".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleInput {
    pub stream: String,
    pub favourite_subject: String,
    pub career_interest: String,
}

impl RuleInput {
    pub fn from_profile(profile: &Profile) -> Self {
        let lower = |field: &Option<String>| field.as_deref().unwrap_or("").trim().to_lowercase();
        RuleInput {
            stream: lower(&profile.stream),
            favourite_subject: lower(&profile.favourite_subject),
            career_interest: lower(&profile.career_interest),
        }
    }

    fn is_science(&self) -> bool {
        contains_any(&self.stream, &["science", "pcb", "pcm"])
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// One row of the decision table.
pub struct CourseRule {
    pub id: &'static str,
    pub applies: fn(&RuleInput) -> bool,
    pub courses: &'static [&'static str],
    pub college_keywords: &'static [&'static str],
}

/// Output of the rule engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSuggestion {
    pub suggested_courses: Vec<String>,
    pub college_keywords: Vec<String>,
    /// Id of the rule that fired.
    pub rule: String,
}

fn science_computing(input: &RuleInput) -> bool {
    let joined = format!("{} {}", input.career_interest, input.favourite_subject);
    input.is_science()
        && (contains_any(&input.career_interest, &["computer", "ai"]) || joined.contains("program"))
}

fn science_life(input: &RuleInput) -> bool {
    input.is_science()
        && (input.favourite_subject.contains("biology")
            || input.career_interest.contains("biotech"))
}

fn science_general(input: &RuleInput) -> bool {
    input.is_science()
}

fn commerce(input: &RuleInput) -> bool {
    input.stream.contains("commerce")
}

fn humanities(input: &RuleInput) -> bool {
    contains_any(&input.stream, &["arts", "humanities"])
}

fn ai_interest(input: &RuleInput) -> bool {
    contains_any(&input.career_interest, &["ai", "machine"])
}

fn fallback(_: &RuleInput) -> bool {
    true
}

/// The shipped rule table. Science rows come first so a science stream never
/// reaches the later stream checks.
pub static DEFAULT_RULES: &[CourseRule] = &[
    CourseRule {
        id: "science_computing",
        applies: science_computing,
        courses: &[
            "B.Tech in Computer Science & Engineering",
            "B.Sc in Computer Science",
            "B.Sc in Mathematics",
        ],
        college_keywords: &["computer", "engineering"],
    },
    CourseRule {
        id: "science_life",
        applies: science_life,
        courses: &["B.Sc Biotechnology", "B.Sc Microbiology"],
        college_keywords: &["biotechnology", "biology"],
    },
    CourseRule {
        id: "science_general",
        applies: science_general,
        courses: &["B.Tech in Engineering (choose branch)", "B.Sc (Science)"],
        college_keywords: &["engineering", "science"],
    },
    CourseRule {
        id: "commerce",
        applies: commerce,
        courses: &["B.Com", "BBA", "BMS"],
        college_keywords: &["commerce", "management"],
    },
    CourseRule {
        id: "humanities",
        applies: humanities,
        courses: &["BA (Humanities)", "B.Des (Design)"],
        college_keywords: &["arts", "design"],
    },
    CourseRule {
        id: "ai_interest",
        applies: ai_interest,
        courses: &["B.Tech / B.Sc in Computer Science with AI electives"],
        college_keywords: &["computer", "ai"],
    },
    CourseRule {
        id: "foundation",
        applies: fallback,
        courses: &["Explore foundation courses (UG diplomas or general B.Sc/BA)"],
        college_keywords: &["university"],
    },
];

/// An ordered rule table. Construct with `RuleSet::default()` for the shipped rules.
pub struct RuleSet {
    rules: &'static [CourseRule],
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES,
        }
    }
}

impl RuleSet {
    pub fn new(rules: &'static [CourseRule]) -> Self {
        Self { rules }
    }

    /// Evaluates the table against a profile. First matching rule wins.
    pub fn suggest(&self, profile: &Profile) -> CourseSuggestion {
        let input = RuleInput::from_profile(profile);

        match self.rules.iter().find(|rule| (rule.applies)(&input)) {
            Some(rule) => CourseSuggestion {
                suggested_courses: rule.courses.iter().map(|c| c.to_string()).collect(),
                college_keywords: rule.college_keywords.iter().map(|k| k.to_string()).collect(),
                rule: rule.id.to_string(),
            },
            // Only reachable with a custom table that lacks a catch-all row.
            None => CourseSuggestion {
                suggested_courses: vec![FOUNDATION_COURSE.to_string()],
                college_keywords: vec!["university".to_string()],
                rule: "foundation".to_string(),
            },
        }
    }
}

const FOUNDATION_COURSE: &str = "Explore foundation courses (UG diplomas or general B.Sc/BA)";
