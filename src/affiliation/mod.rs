//! Affiliation classification.
//!
//! An affiliation is academic when it contains, as a whole word and in any
//! case, one of [`ACADEMIC_KEYWORDS`]. Everything else counts as a
//! company affiliation. This is a lexical heuristic: "National Institute of
//! Standards" reads as academic, "University Pharmaceuticals Inc." does too.
//!
//! The corresponding-author email is the last affiliation string, across all
//! authors in order, that contains an `@`. The whole string is kept; no
//! address is extracted from it.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{
    join_or_not_available, or_not_available, RawArticle, ReportRow, NOT_AVAILABLE,
};

/// Words that mark an affiliation as academic
pub const ACADEMIC_KEYWORDS: [&str; 6] = [
    "university",
    "college",
    "institute",
    "school",
    "hospital",
    "center",
];

static ACADEMIC_PATTERN: OnceLock<Regex> = OnceLock::new();

fn academic_pattern() -> &'static Regex {
    ACADEMIC_PATTERN.get_or_init(|| {
        Regex::new(&format!(r"(?i)\b({})\b", ACADEMIC_KEYWORDS.join("|")))
            .expect("academic keyword pattern is a valid regex")
    })
}

/// Whether an affiliation string names an academic institution
pub fn is_academic(affiliation: &str) -> bool {
    academic_pattern().is_match(affiliation)
}

/// A non-academic author paired with the affiliation that made them so
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorAffiliation {
    pub author: String,
    pub affiliation: String,
}

/// Classification result for one article, before placeholder substitution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedArticle {
    pub pmid: Option<String>,
    pub title: Option<String>,
    pub pub_year: Option<String>,

    /// One entry per non-academic (author, affiliation) pair, in document
    /// order. An author with two company affiliations appears twice.
    pub non_academic: Vec<AuthorAffiliation>,

    pub corresponding_email: Option<String>,
}

impl ClassifiedArticle {
    /// Author names of `non_academic`, in order
    pub fn author_names(&self) -> Vec<String> {
        self.non_academic.iter().map(|p| p.author.clone()).collect()
    }

    /// Affiliations of `non_academic`, in order
    pub fn affiliations(&self) -> Vec<String> {
        self.non_academic
            .iter()
            .map(|p| p.affiliation.clone())
            .collect()
    }
}

/// Classify every affiliation of an article.
///
/// Empty affiliation strings are skipped entirely.
pub fn classify_article(article: &RawArticle) -> ClassifiedArticle {
    let mut non_academic = Vec::new();
    let mut corresponding_email = None;

    for author in &article.authors {
        for affiliation in author.affiliations.iter().filter(|a| !a.is_empty()) {
            if !is_academic(affiliation) {
                non_academic.push(AuthorAffiliation {
                    author: author.display_name(),
                    affiliation: affiliation.clone(),
                });
            }
            if affiliation.contains('@') {
                corresponding_email = Some(affiliation.clone());
            }
        }
    }

    ClassifiedArticle {
        pmid: article.pmid.clone(),
        title: article.title.clone(),
        pub_year: article.pub_year.clone(),
        non_academic,
        corresponding_email,
    }
}

impl From<ClassifiedArticle> for ReportRow {
    fn from(article: ClassifiedArticle) -> Self {
        let non_academic_authors = join_or_not_available(&article.author_names());
        let company_affiliations = join_or_not_available(&article.affiliations());

        ReportRow {
            pubmed_id: or_not_available(article.pmid),
            title: or_not_available(article.title),
            publication_date: or_not_available(article.pub_year),
            non_academic_authors,
            company_affiliations,
            corresponding_author_email: article
                .corresponding_email
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}

/// Classify a batch of articles into report rows, preserving order
pub fn build_report(articles: &[RawArticle]) -> Vec<ReportRow> {
    articles
        .iter()
        .map(|article| ReportRow::from(classify_article(article)))
        .collect()
}
