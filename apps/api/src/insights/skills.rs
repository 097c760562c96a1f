use serde::{Deserialize, Serialize};

use crate::models::listing::ListingRow;

/// The fixed vocabulary of in-demand skills, defined once and shared by the
/// frequency chart, the skill matcher, and the resume gap analyzer.
///
/// Matching is case-insensitive substring over the description, so short
/// names like "R" also hit words containing the letter.
pub const SKILL_VOCABULARY: &[&str] = &[
    "Python", "SQL", "Power BI", "Excel", "Tableau", "R", "Java", "C++", "AWS", "Azure", "Git",
];

/// True if `skill` is in the vocabulary, compared case-insensitively.
pub fn in_vocabulary(skill: &str) -> bool {
    let lower = skill.to_lowercase();
    SKILL_VOCABULARY.iter().any(|s| s.to_lowercase() == lower)
}

/// How many filtered listings mention a given skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

/// Counts, for every vocabulary skill, the listings whose description
/// mentions it. One listing can count toward several skills; listings with
/// no description count toward none. Sorted by count descending; the sort
/// is stable, so ties keep vocabulary order.
pub fn skill_frequencies(listings: &[ListingRow]) -> Vec<SkillCount> {
    let mut counts: Vec<SkillCount> = SKILL_VOCABULARY
        .iter()
        .map(|&skill| {
            let needle = skill.to_lowercase();
            SkillCount {
                skill: skill.to_string(),
                count: listings
                    .iter()
                    .filter(|listing| listing.description_contains(&needle))
                    .count(),
            }
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
