use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::listing::ListingRow;

/// How many leading values the location and company rankings keep.
pub const TOP_LIMIT: usize = 10;

/// Cap on the title word ranking, which has a much longer tail.
const TITLE_WORD_LIMIT: usize = 50;

/// Title words shorter than this are dropped.
const MIN_WORD_CHARS: usize = 2;

/// A ranked categorical value with its occurrence count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

fn rank_counts(counts: HashMap<String, usize>, limit: usize) -> Vec<ValueCount> {
    let mut ranked: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount { value, count })
        .collect();
    // Ties break alphabetically so rankings are deterministic.
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    ranked.truncate(limit);
    ranked
}

/// Ranks values by occurrence count, descending. NULLs are skipped by the
/// callers; values count as-is, with no case folding.
pub fn top_values<'a, I>(values: I, limit: usize) -> Vec<ValueCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    rank_counts(counts, limit)
}

/// The ten most frequent locations across the filtered set.
pub fn top_locations(listings: &[ListingRow]) -> Vec<ValueCount> {
    top_values(
        listings.iter().filter_map(|l| l.location.as_deref()),
        TOP_LIMIT,
    )
}

/// The ten most frequent companies across the filtered set.
pub fn top_companies(listings: &[ListingRow]) -> Vec<ValueCount> {
    top_values(
        listings.iter().filter_map(|l| l.company.as_deref()),
        TOP_LIMIT,
    )
}

/// Word frequencies across position titles: lowercased, split on
/// non-alphanumeric characters, single letters dropped.
pub fn title_word_counts(listings: &[ListingRow]) -> Vec<ValueCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for title in listings.iter().filter_map(|l| l.position_name.as_deref()) {
        for word in title.to_lowercase().split(|c: char| !c.is_alphanumeric()) {
            if word.chars().count() >= MIN_WORD_CHARS {
                *counts.entry(word.to_string()).or_insert(0) += 1;
            }
        }
    }
    rank_counts(counts, TITLE_WORD_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(position: Option<&str>, company: Option<&str>, location: Option<&str>) -> ListingRow {
        ListingRow {
            position_name: position.map(str::to_string),
            company: company.map(str::to_string),
            location: location.map(str::to_string),
            description: None,
        }
    }

    #[test]
    fn test_top_values_ranks_by_count_then_name() {
        let ranked = top_values(["b", "a", "b", "c", "a", "b"], 10);
        assert_eq!(ranked[0].value, "b");
        assert_eq!(ranked[0].count, 3);
        assert_eq!(ranked[1].value, "a");
        assert_eq!(ranked[2].value, "c");
    }

    #[test]
    fn test_top_values_caps_at_limit() {
        let values = ["a", "b", "c", "d", "e"];
        let ranked = top_values(values, 3);
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_top_locations_skip_nulls() {
        let listings = vec![
            listing(None, None, Some("Berlin")),
            listing(None, None, None),
            listing(None, None, Some("Berlin")),
            listing(None, None, Some("Hamburg")),
        ];
        let ranked = top_locations(&listings);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].value, "Berlin");
        assert_eq!(ranked[0].count, 2);
    }

    #[test]
    fn test_top_companies_keep_at_most_ten() {
        let names: Vec<String> = (0..15).map(|i| format!("company-{i:02}")).collect();
        let listings: Vec<ListingRow> = names
            .iter()
            .map(|n| listing(None, Some(n), None))
            .collect();
        assert_eq!(top_companies(&listings).len(), TOP_LIMIT);
    }

    #[test]
    fn test_title_words_tokenized_and_lowercased() {
        let listings = vec![
            listing(Some("Senior Data Analyst (Remote)"), None, None),
            listing(Some("Data Engineer"), None, None),
        ];
        let ranked = title_word_counts(&listings);

        let data = ranked.iter().find(|v| v.value == "data").unwrap();
        assert_eq!(data.count, 2);
        assert!(ranked.iter().any(|v| v.value == "remote"));
        assert!(ranked.iter().all(|v| v.value == v.value.to_lowercase()));
    }

    #[test]
    fn test_title_words_drop_single_letters() {
        let listings = vec![listing(Some("R & D Analyst"), None, None)];
        let ranked = title_word_counts(&listings);
        assert!(ranked.iter().all(|v| v.value != "r" && v.value != "d"));
        assert!(ranked.iter().any(|v| v.value == "analyst"));
    }
}
