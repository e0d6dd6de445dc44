//! Literature sources.
//!
//! A [`LiteratureSource`] answers the two remote calls the report needs: a
//! keyword search returning record identifiers, and a batched fetch turning
//! those identifiers into [`RawArticle`]s. Both return explicit errors;
//! collapsing failures into empty results is the pipeline's job, not the
//! source's.
//!
//! [`PubMedSource`] talks to NCBI E-utilities. [`MockSource`] returns canned
//! data and counts calls, for tests.

pub mod mock;
mod pubmed;

pub use mock::MockSource;
pub use pubmed::PubMedSource;

use crate::models::{RawArticle, SearchQuery};
use async_trait::async_trait;

/// Decoding outcome for one article of a fetched batch
pub type ArticleResult = Result<RawArticle, ArticleError>;

/// Interface of a remote literature database
#[async_trait]
pub trait LiteratureSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "pubmed")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Search for record identifiers matching the query, at most
    /// `query.max_results` of them
    async fn search_ids(&self, query: &SearchQuery) -> Result<Vec<String>, SourceError>;

    /// Fetch article records for the given identifiers in one request.
    ///
    /// `Err` means the whole batch failed. Articles that fail to decode on
    /// their own come back as `Err` entries inside the batch.
    async fn fetch_articles(&self, ids: &[String]) -> Result<Vec<ArticleResult>, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (XML)
    #[error("Parse error: {0}")]
    Parse(String),

    /// API error from the source
    #[error("API error: {0}")]
    Api(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<quick_xml::DeError> for SourceError {
    fn from(err: quick_xml::DeError) -> Self {
        SourceError::Parse(format!("XML: {}", err))
    }
}

/// Failure to decode a single article of an otherwise valid batch
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArticleError {
    /// The article's markup could not be read
    #[error("malformed article XML: {0}")]
    Xml(String),
}

impl From<quick_xml::Error> for ArticleError {
    fn from(err: quick_xml::Error) -> Self {
        ArticleError::Xml(err.to_string())
    }
}
