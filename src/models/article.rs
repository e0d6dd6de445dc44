//! Article records as they come back from the fetch endpoint.
//!
//! Every field is optional: PubMed records routinely omit a publication
//! year, a given name, or affiliation details. Substituting placeholders
//! for missing values happens once, when a report row is built.

/// One author entry of a fetched article
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAuthor {
    /// Given name (`ForeName`)
    pub fore_name: Option<String>,

    /// Family name (`LastName`)
    pub last_name: Option<String>,

    /// Affiliation strings in document order
    pub affiliations: Vec<String>,
}

impl RawAuthor {
    /// Create an author with both name parts set
    pub fn new(fore_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            fore_name: Some(fore_name.into()),
            last_name: Some(last_name.into()),
            affiliations: Vec::new(),
        }
    }

    /// Add an affiliation string
    pub fn affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliations.push(affiliation.into());
        self
    }

    /// Name rendered as `"given family"`.
    ///
    /// Missing parts become empty segments, so an author without a given
    /// name renders with a leading space.
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.fore_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
    }
}

/// One `PubmedArticle` as decoded from the fetch response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArticle {
    /// PubMed identifier
    pub pmid: Option<String>,

    /// Article title with inline markup flattened to text
    pub title: Option<String>,

    /// Journal issue publication year
    pub pub_year: Option<String>,

    /// Authors in listed order
    pub authors: Vec<RawAuthor>,
}

impl RawArticle {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the PubMed identifier
    pub fn pmid(mut self, pmid: impl Into<String>) -> Self {
        self.pmid = Some(pmid.into());
        self
    }

    /// Set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the publication year
    pub fn pub_year(mut self, year: impl Into<String>) -> Self {
        self.pub_year = Some(year.into());
        self
    }

    /// Append an author
    pub fn author(mut self, author: RawAuthor) -> Self {
        self.authors.push(author);
        self
    }
}
