//! College matcher: ranks catalog colleges against a keyword set.
//!
//! Score per college, summed over keywords (all comparisons lowercase):
//! - +2 when any tag contains the keyword
//! - +3 for every program whose name contains the keyword
//!
//! Zero-score colleges are dropped. Ranking is by descending score with a stable
//! sort, so equal scores keep catalog order.

use crate::models::catalog::CollegeEntry;

const TAG_HIT: u32 = 2;
const PROGRAM_HIT: u32 = 3;

/// A catalog college together with its keyword score.
#[derive(Debug, Clone, PartialEq)]
pub struct CollegeMatch<'a> {
    pub college: &'a CollegeEntry,
    pub score: u32,
}

/// Returns at most `limit` colleges, best match first.
pub fn match_colleges<'a>(
    colleges: &'a [CollegeEntry],
    keywords: &[String],
    limit: usize,
) -> Vec<CollegeMatch<'a>> {
    let keywords = normalize_keywords(keywords);
    if keywords.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut matches: Vec<CollegeMatch<'a>> = colleges
        .iter()
        .map(|college| CollegeMatch {
            college,
            score: score_college(college, &keywords),
        })
        .filter(|m| m.score > 0)
        .collect();

    // sort_by is stable: ties stay in catalog order
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(limit);
    matches
}

/// Lowercases, trims, drops blanks and repeats while keeping first-seen order.
fn normalize_keywords(keywords: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(keywords.len());
    for kw in keywords {
        let kw = kw.trim().to_lowercase();
        if !kw.is_empty() && !out.contains(&kw) {
            out.push(kw);
        }
    }
    out
}

fn score_college(college: &CollegeEntry, keywords: &[String]) -> u32 {
    let tags: Vec<String> = college.tags.iter().map(|t| t.to_lowercase()).collect();
    let programs: Vec<String> = college
        .programs
        .iter()
        .map(|p| p.name.to_lowercase())
        .collect();

    keywords
        .iter()
        .map(|kw| {
            let tag_score = if tags.iter().any(|t| t.contains(kw.as_str())) {
                TAG_HIT
            } else {
                0
            };
            let program_hits = programs.iter().filter(|p| p.contains(kw.as_str())).count() as u32;
            tag_score + program_hits * PROGRAM_HIT
        })
        .sum()
}
