use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::insights::skills::{in_vocabulary, SKILL_VOCABULARY};
use crate::models::listing::ListingRow;

/// Cap on how many matching listings one report returns for display.
/// `total` always carries the uncapped match count.
pub const DISPLAY_CAP: usize = 10;

pub const NO_SKILLS_SELECTED: &str = "Select at least one skill to get job recommendations.";

/// Matching listings for a skill selection or a resume, capped for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMatchReport {
    pub total: usize,
    pub listings: Vec<ListingRow>,
    pub guidance: Option<String>,
}

impl SkillMatchReport {
    pub fn empty(guidance: &str) -> Self {
        SkillMatchReport {
            total: 0,
            listings: vec![],
            guidance: Some(guidance.to_string()),
        }
    }
}

/// Lowercases a skill selection, rejecting anything outside the vocabulary.
pub fn normalize_selection(selected: &[String]) -> Result<Vec<String>, AppError> {
    selected
        .iter()
        .map(|skill| {
            let trimmed = skill.trim();
            if in_vocabulary(trimmed) {
                Ok(trimmed.to_lowercase())
            } else {
                Err(AppError::Validation(format!(
                    "Unknown skill '{trimmed}'; valid skills are: {}",
                    SKILL_VOCABULARY.join(", ")
                )))
            }
        })
        .collect()
}

/// Returns listings whose description mentions at least one selected skill,
/// in input order. An empty selection matches nothing and carries guidance;
/// it never falls through to returning every job.
pub fn match_by_skills(
    listings: &[ListingRow],
    selected: &[String],
) -> Result<SkillMatchReport, AppError> {
    if selected.is_empty() {
        return Ok(SkillMatchReport::empty(NO_SKILLS_SELECTED));
    }
    let needles = normalize_selection(selected)?;
    Ok(capped_matches(listings, &needles))
}

/// Shared matcher core: OR-match over lowercased needles, capped to
/// `DISPLAY_CAP` rows with the uncapped total preserved.
pub(crate) fn capped_matches(listings: &[ListingRow], needles_lower: &[String]) -> SkillMatchReport {
    let matched: Vec<&ListingRow> = listings
        .iter()
        .filter(|listing| listing.description_matches_any(needles_lower))
        .collect();
    SkillMatchReport {
        total: matched.len(),
        listings: matched.into_iter().take(DISPLAY_CAP).cloned().collect(),
        guidance: None,
    }
}
