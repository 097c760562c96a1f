use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One job listing row as served by the dashboard.
///
/// Every field is optional: the store's schema is whatever the loaded CSV
/// provided, so any of these columns may be absent (selected as NULL) or
/// hold a NULL written for an empty CSV cell.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ListingRow {
    pub position_name: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl ListingRow {
    /// Case-insensitive substring check against the description.
    /// `needle_lower` must already be lowercased. NULL descriptions never match.
    pub fn description_contains(&self, needle_lower: &str) -> bool {
        self.description
            .as_deref()
            .map(|d| d.to_lowercase().contains(needle_lower))
            .unwrap_or(false)
    }

    /// True if the description contains any of the given lowercased needles.
    pub fn description_matches_any(&self, needles_lower: &[String]) -> bool {
        match self.description.as_deref() {
            Some(d) => {
                let haystack = d.to_lowercase();
                needles_lower.iter().any(|n| haystack.contains(n.as_str()))
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(description: Option<&str>) -> ListingRow {
        ListingRow {
            position_name: Some("Data Analyst".to_string()),
            company: Some("Acme".to_string()),
            location: Some("Berlin".to_string()),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_description_contains_is_case_insensitive() {
        let row = listing(Some("Strong PYTHON and SQL skills required"));
        assert!(row.description_contains("python"));
        assert!(row.description_contains("sql"));
        assert!(!row.description_contains("tableau"));
    }

    #[test]
    fn test_null_description_never_matches() {
        let row = listing(None);
        assert!(!row.description_contains("python"));
        assert!(!row.description_matches_any(&["python".to_string()]));
    }

    #[test]
    fn test_matches_any_with_empty_needles() {
        let row = listing(Some("anything"));
        assert!(!row.description_matches_any(&[]));
    }

    #[test]
    fn test_matches_any_hits_on_second_needle() {
        let row = listing(Some("We use Excel heavily"));
        let needles = vec!["aws".to_string(), "excel".to_string()];
        assert!(row.description_matches_any(&needles));
    }
}
