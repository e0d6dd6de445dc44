//! Report row model.

use serde::{Deserialize, Serialize};

/// Placeholder written for any value the source record did not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// Separator between entries of the author and affiliation columns
pub const LIST_SEPARATOR: &str = "; ";

/// Column names of the CSV report, in order
pub const REPORT_HEADER: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// One line of the report.
///
/// Serde names match [`REPORT_HEADER`], so a written report can be read
/// back with `csv::Reader::deserialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "PubmedID")]
    pub pubmed_id: String,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Publication Date")]
    pub publication_date: String,

    /// Non-academic author names joined with [`LIST_SEPARATOR`]
    #[serde(rename = "Non-academic Author(s)")]
    pub non_academic_authors: String,

    /// Affiliations of those authors, aligned with `non_academic_authors`
    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliations: String,

    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_author_email: String,
}

impl ReportRow {
    /// Fields in header order
    pub fn fields(&self) -> [&str; 6] {
        [
            &self.pubmed_id,
            &self.title,
            &self.publication_date,
            &self.non_academic_authors,
            &self.company_affiliations,
            &self.corresponding_author_email,
        ]
    }
}

/// Value or [`NOT_AVAILABLE`]
pub fn or_not_available(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Entries joined with [`LIST_SEPARATOR`], or [`NOT_AVAILABLE`] when empty
pub fn join_or_not_available(values: &[String]) -> String {
    if values.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        values.join(LIST_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_not_available() {
        assert_eq!(or_not_available(None), "N/A");
        assert_eq!(or_not_available(Some("2020".to_string())), "2020");
        assert_eq!(or_not_available(Some(String::new())), "");
    }

    #[test]
    fn test_join_or_not_available() {
        assert_eq!(join_or_not_available(&[]), "N/A");
        assert_eq!(
            join_or_not_available(&["A B".to_string(), "C D".to_string()]),
            "A B; C D"
        );
    }
}
