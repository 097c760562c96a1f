use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::insights::skills::SKILL_VOCABULARY;
use crate::matching::matcher::{capped_matches, SkillMatchReport};
use crate::models::listing::ListingRow;

pub const NO_RESUME_SKILLS: &str = "No skills recognized in the resume text.";

/// Vocabulary skills the resume covers versus ones it lacks.
/// Both lists are lowercased and sorted for deterministic display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapReport {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Splits comma-separated resume text into lowercased skill terms.
/// Blank terms are dropped and duplicates collapsed, keeping first
/// occurrence order.
pub fn parse_resume_skills(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for raw in text.split(',') {
        let term = raw.trim().to_lowercase();
        if !term.is_empty() && !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// Compares resume terms against the skill vocabulary. Terms outside the
/// vocabulary (say, "cobol") influence neither list.
pub fn analyze_gap(resume_terms: &[String]) -> GapReport {
    let resume: BTreeSet<&str> = resume_terms.iter().map(String::as_str).collect();
    let vocabulary: BTreeSet<String> =
        SKILL_VOCABULARY.iter().map(|s| s.to_lowercase()).collect();

    let matched = vocabulary
        .iter()
        .filter(|skill| resume.contains(skill.as_str()))
        .cloned()
        .collect();
    let missing = vocabulary
        .iter()
        .filter(|skill| !resume.contains(skill.as_str()))
        .cloned()
        .collect();
    GapReport { matched, missing }
}

/// Suggests listings mentioning any resume term. An empty term set
/// short-circuits to no suggestions rather than matching every listing.
pub fn suggest_listings(listings: &[ListingRow], resume_terms: &[String]) -> SkillMatchReport {
    if resume_terms.is_empty() {
        return SkillMatchReport::empty(NO_RESUME_SKILLS);
    }
    capped_matches(listings, resume_terms)
}
