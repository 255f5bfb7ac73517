//! Timeline Builder: linear assembly of the career timeline.
//!
//! Emission order: milestone -> course -> [college] -> skills -> career -> summary.
//! The college node only appears when the matcher finds at least one college
//! for the course rule's keywords; later nodes are renumbered so `order` stays dense.
//!
//! `build` performs no I/O and reads no clock: the caller passes the timestamp.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::catalog::matcher::match_colleges;
use crate::catalog::Catalog;
use crate::models::profile::Profile;
use crate::models::timeline::{CollegeRef, NodeType, Timeline, TimelineNode};
use crate::recommendation::rules::{CourseSuggestion, RuleSet};

/// Rule-set revision stamped on every generated timeline.
pub const TIMELINE_VERSION: &str = "rules-v1";

pub const DEFAULT_COLLEGE_LIMIT: usize = 5;

const DEFAULT_CLASS_GRADE: &str = "current studies";
const DEFAULT_FAVOURITE_SUBJECT: &str = "your chosen subjects";
const DEFAULT_SKILLS: &str = "communication, basic programming, problem-solving";
const DEFAULT_CAREER: &str = "Relevant industry roles";

pub struct TimelineBuilder<'a> {
    catalog: &'a Catalog,
    rules: &'a RuleSet,
    college_limit: usize,
}

impl<'a> TimelineBuilder<'a> {
    pub fn new(catalog: &'a Catalog, rules: &'a RuleSet) -> Self {
        Self {
            catalog,
            rules,
            college_limit: DEFAULT_COLLEGE_LIMIT,
        }
    }

    pub fn with_college_limit(mut self, limit: usize) -> Self {
        self.college_limit = limit.max(1);
        self
    }

    pub fn build(&self, profile: &Profile, generated_at: DateTime<Utc>) -> Timeline {
        let suggestion = self.rules.suggest(profile);
        let colleges: Vec<CollegeRef> = match_colleges(
            &self.catalog.colleges,
            &suggestion.college_keywords,
            self.college_limit,
        )
        .into_iter()
        .map(|m| CollegeRef {
            name: m.college.name.clone(),
            website: m.college.website.clone(),
        })
        .collect();

        let mut nodes = NodeSequence::default();
        nodes.push(milestone_node(profile));
        nodes.push(course_node(profile, &suggestion));
        if !colleges.is_empty() {
            nodes.push(college_node(colleges));
        }
        nodes.push(skills_node(profile));
        nodes.push(career_node(profile));
        nodes.push(summary_node());

        Timeline {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            version: TIMELINE_VERSION.to_string(),
            nodes: nodes.into_inner(),
        }
    }
}

/// Assigns `order` and `id` as nodes are appended.
#[derive(Default)]
struct NodeSequence {
    nodes: Vec<TimelineNode>,
}

impl NodeSequence {
    fn push(&mut self, draft: NodeDraft) {
        let order = self.nodes.len() as u32 + 1;
        self.nodes.push(TimelineNode {
            id: format!("m{order}"),
            node_type: draft.node_type,
            title: draft.title,
            description: draft.description,
            tips: draft.tips,
            suggested_courses: draft.suggested_courses,
            colleges: draft.colleges,
            order,
        });
    }

    fn into_inner(self) -> Vec<TimelineNode> {
        self.nodes
    }
}

struct NodeDraft {
    node_type: NodeType,
    title: String,
    description: String,
    tips: Option<Vec<String>>,
    suggested_courses: Option<Vec<String>>,
    colleges: Option<Vec<CollegeRef>>,
}

impl NodeDraft {
    fn new(node_type: NodeType, title: String, description: &str) -> Self {
        Self {
            node_type,
            title,
            description: description.to_string(),
            tips: None,
            suggested_courses: None,
            colleges: None,
        }
    }

    fn tips(mut self, tips: Vec<String>) -> Self {
        self.tips = Some(tips);
        self
    }
}

/// Present, non-blank field value or the given default.
fn or_default<'p>(value: &'p Option<String>, default: &'p str) -> &'p str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
}

fn milestone_node(profile: &Profile) -> NodeDraft {
    let grade = or_default(&profile.class_grade, DEFAULT_CLASS_GRADE);
    NodeDraft::new(
        NodeType::Milestone,
        format!("Complete {grade} with strong fundamentals"),
        "Consolidate your current coursework and keep your scores steady before choosing a degree.",
    )
    .tips(vec![
        "Revise core concepts every week".to_string(),
        "Keep track of entrance exam dates and eligibility".to_string(),
        "Talk to teachers and seniors about their choices".to_string(),
    ])
}

fn course_node(profile: &Profile, suggestion: &CourseSuggestion) -> NodeDraft {
    let subject = or_default(&profile.favourite_subject, DEFAULT_FAVOURITE_SUBJECT);
    let first = suggestion
        .suggested_courses
        .first()
        .map(String::as_str)
        .unwrap_or("a suitable undergraduate course");

    let mut draft = NodeDraft::new(
        NodeType::Course,
        format!("Pursue {first}"),
        "Undergraduate options that fit your stream and interests.",
    )
    .tips(vec![
        format!("Build on {subject} while preparing for admissions"),
        "Compare syllabi and entrance requirements before applying".to_string(),
    ]);
    draft.suggested_courses = Some(suggestion.suggested_courses.clone());
    draft
}

fn college_node(colleges: Vec<CollegeRef>) -> NodeDraft {
    let mut draft = NodeDraft::new(
        NodeType::College,
        "Shortlist colleges".to_string(),
        "Colleges whose programs and focus areas match the suggested courses.",
    )
    .tips(vec![
        "Check admission criteria and deadlines on each college website".to_string(),
        "Compare fees, scholarships and placement records".to_string(),
    ]);
    draft.colleges = Some(colleges);
    draft
}

fn skills_node(profile: &Profile) -> NodeDraft {
    let skills = profile
        .skills
        .as_ref()
        .filter(|s| !s.is_empty())
        .map(|s| s.join(", "))
        .unwrap_or_else(|| DEFAULT_SKILLS.to_string());

    NodeDraft::new(
        NodeType::Skills,
        "Build practical skills".to_string(),
        "Strengthen the skills employers and colleges look for alongside your degree.",
    )
    .tips(vec![
        format!("Keep improving: {skills}"),
        "Take on small projects, internships or certifications".to_string(),
    ])
}

fn career_node(profile: &Profile) -> NodeDraft {
    let career = or_default(&profile.career_interest, DEFAULT_CAREER);
    NodeDraft::new(
        NodeType::Career,
        format!("Career path: {career}"),
        "Entry-level roles and next steps once you graduate.",
    )
    .tips(vec![
        "Build a portfolio of your work".to_string(),
        "Connect with professionals in the field".to_string(),
    ])
}

fn summary_node() -> NodeDraft {
    NodeDraft::new(
        NodeType::Summary,
        "Keep reviewing your plan".to_string(),
        "Revisit this timeline as your interests and results change, and regenerate it after updating your profile.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::{CollegeEntry, Program};
    use chrono::TimeZone;
    use serde_json::Map;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    fn college(name: &str, tags: &[&str], programs: &[&str]) -> CollegeEntry {
        CollegeEntry {
            name: name.to_string(),
            website: format!("https://{}.example.edu", name.to_lowercase()),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            programs: programs
                .iter()
                .map(|p| Program {
                    name: p.to_string(),
                    details: Map::new(),
                })
                .collect(),
        }
    }

    fn fixture_catalog() -> Catalog {
        Catalog::with_colleges(vec![
            college("Northfield", &["engineering", "computer"], &["B.Tech Computer Science"]),
            college("Lakeside", &["commerce"], &["B.Com", "BBA Management"]),
            college("Riverside", &["arts"], &["BA English"]),
        ])
    }

    fn build(profile: &Profile, catalog: &Catalog) -> Timeline {
        let rules = RuleSet::default();
        TimelineBuilder::new(catalog, &rules).build(profile, now())
    }

    fn types(timeline: &Timeline) -> Vec<NodeType> {
        timeline.nodes.iter().map(|n| n.node_type).collect()
    }

    fn assert_dense(timeline: &Timeline) {
        for (idx, node) in timeline.nodes.iter().enumerate() {
            let expected = idx as u32 + 1;
            assert_eq!(node.order, expected);
            assert_eq!(node.id, format!("m{expected}"));
        }
    }

    fn science_ai() -> Profile {
        Profile {
            stream: Some("Science".to_string()),
            career_interest: Some("AI".to_string()),
            class_grade: Some("12th".to_string()),
            favourite_subject: Some("Maths".to_string()),
            skills: Some(vec!["python".to_string(), "electronics".to_string()]),
            ..Default::default()
        }
    }

    #[test]
    fn test_with_college_match_emits_six_nodes() {
        let timeline = build(&science_ai(), &fixture_catalog());
        assert_eq!(
            types(&timeline),
            vec![
                NodeType::Milestone,
                NodeType::Course,
                NodeType::College,
                NodeType::Skills,
                NodeType::Career,
                NodeType::Summary
            ]
        );
        assert_dense(&timeline);

        let colleges = timeline.nodes[2].colleges.as_ref().unwrap();
        assert_eq!(colleges.len(), 1);
        assert_eq!(colleges[0].name, "Northfield");
        assert_eq!(colleges[0].website, "https://northfield.example.edu");
    }

    #[test]
    fn test_without_college_match_renumbers_densely() {
        let timeline = build(&science_ai(), &Catalog::default());
        assert_eq!(
            types(&timeline),
            vec![
                NodeType::Milestone,
                NodeType::Course,
                NodeType::Skills,
                NodeType::Career,
                NodeType::Summary
            ]
        );
        assert_dense(&timeline);
        assert_eq!(timeline.nodes[2].id, "m3");
        assert_eq!(timeline.nodes[2].node_type, NodeType::Skills);
    }

    #[test]
    fn test_empty_profile_uses_defaults() {
        // nothing in the fixture is tagged "university"
        let timeline = build(&Profile::default(), &fixture_catalog());
        assert_eq!(timeline.nodes.len(), 5);
        assert_dense(&timeline);

        let milestone = &timeline.nodes[0];
        assert!(milestone.title.contains("current studies"));

        let course = &timeline.nodes[1];
        assert_eq!(
            course.suggested_courses.as_deref(),
            Some(&["Explore foundation courses (UG diplomas or general B.Sc/BA)".to_string()][..])
        );
        assert!(course.tips.as_ref().unwrap()[0].contains("your chosen subjects"));

        let skills = &timeline.nodes[2];
        assert!(skills.tips.as_ref().unwrap()[0]
            .contains("communication, basic programming, problem-solving"));

        let career = &timeline.nodes[3];
        assert!(career.title.contains("Relevant industry roles"));
    }

    #[test]
    fn test_empty_profile_with_university_college_emits_six_nodes() {
        let catalog = Catalog::with_colleges(vec![
            college("Northfield", &["engineering"], &[]),
            college("Central", &["university", "arts"], &["BA History"]),
        ]);
        let timeline = build(&Profile::default(), &catalog);

        assert_eq!(timeline.nodes.len(), 6);
        assert_dense(&timeline);
        assert_eq!(timeline.nodes[2].node_type, NodeType::College);
        let names: Vec<&str> = timeline.nodes[2]
            .colleges
            .as_ref()
            .unwrap()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Central"]);
    }

    #[test]
    fn test_profile_fields_are_interpolated() {
        let timeline = build(&science_ai(), &fixture_catalog());

        assert!(timeline.nodes[0].title.contains("12th"));
        assert_eq!(
            timeline.nodes[1].title,
            "Pursue B.Tech in Computer Science & Engineering"
        );
        assert_eq!(timeline.nodes[1].suggested_courses.as_ref().unwrap().len(), 3);
        assert!(timeline.nodes[1].tips.as_ref().unwrap()[0].contains("Maths"));
        assert!(timeline.nodes[3].tips.as_ref().unwrap()[0].contains("python, electronics"));
        assert!(timeline.nodes[4].title.contains("AI"));
    }

    #[test]
    fn test_blank_fields_fall_back_to_defaults() {
        let profile = Profile {
            class_grade: Some("   ".to_string()),
            skills: Some(vec![]),
            ..Default::default()
        };
        let timeline = build(&profile, &Catalog::default());
        assert!(timeline.nodes[0].title.contains("current studies"));
        assert!(timeline.nodes[2].tips.as_ref().unwrap()[0].contains("problem-solving"));
    }

    #[test]
    fn test_college_limit_caps_college_node() {
        let catalog = Catalog::with_colleges(vec![
            college("A", &["commerce"], &[]),
            college("B", &["commerce"], &["B.Commerce (Hons)"]),
            college("C", &["management"], &[]),
        ]);
        let rules = RuleSet::default();
        let profile = Profile {
            stream: Some("Commerce".to_string()),
            ..Default::default()
        };
        let timeline = TimelineBuilder::new(&catalog, &rules)
            .with_college_limit(2)
            .build(&profile, now());

        let names: Vec<&str> = timeline.nodes[2]
            .colleges
            .as_ref()
            .unwrap()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_metadata_and_determinism() {
        let catalog = fixture_catalog();
        let first = build(&science_ai(), &catalog);
        let second = build(&science_ai(), &catalog);

        assert_eq!(first.generated_at, "2026-03-14T09:30:00Z");
        assert_eq!(first.version, TIMELINE_VERSION);
        assert_eq!(first, second);
    }

    #[test]
    fn test_type_sequence_holds_across_streams() {
        let catalog = fixture_catalog();
        for stream in ["Science", "PCB", "Commerce", "Arts", "Humanities", "", "Other"] {
            let profile = Profile {
                stream: Some(stream.to_string()),
                ..Default::default()
            };
            let timeline = build(&profile, &catalog);
            let without_college: Vec<NodeType> = types(&timeline)
                .into_iter()
                .filter(|t| *t != NodeType::College)
                .collect();
            assert_eq!(
                without_college,
                vec![
                    NodeType::Milestone,
                    NodeType::Course,
                    NodeType::Skills,
                    NodeType::Career,
                    NodeType::Summary
                ]
            );
            assert!(timeline.nodes.len() == 5 || timeline.nodes.len() == 6);
            assert_dense(&timeline);
        }
    }
}
