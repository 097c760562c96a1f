use serde::{Deserialize, Serialize};

use crate::models::listing::ListingRow;

/// The skill whose adoption the dashboard tracks across the filtered set.
pub const TREND_SKILL: &str = "Python";

/// One listing's contribution to the trend: whether its description mentions
/// the tracked skill, and the running total up to and including that row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionPoint {
    pub mentioned: bool,
    pub cumulative: usize,
}

/// Walks the filtered listings in result order and accumulates mentions of
/// `skill`. Output length equals input length, the running total never
/// decreases, and the final value is the total mention count.
pub fn cumulative_mentions(listings: &[ListingRow], skill: &str) -> Vec<MentionPoint> {
    let needle = skill.to_lowercase();
    let mut cumulative = 0;
    listings
        .iter()
        .map(|listing| {
            let mentioned = listing.description_contains(&needle);
            if mentioned {
                cumulative += 1;
            }
            MentionPoint {
                mentioned,
                cumulative,
            }
        })
        .collect()
}
