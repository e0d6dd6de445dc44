//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::models::{RawArticle, SearchQuery};
use crate::sources::{ArticleError, ArticleResult, LiteratureSource, SourceError};

/// A mock source that returns predefined responses and counts calls.
#[derive(Debug, Default)]
pub struct MockSource {
    ids: Vec<String>,
    articles: Vec<ArticleResult>,
    search_failure: Option<String>,
    fetch_failure: Option<String>,
    search_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MockSource {
    /// Create a mock source that finds nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifiers returned by `search_ids`.
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Append an article returned by `fetch_articles`.
    pub fn with_article(mut self, article: RawArticle) -> Self {
        self.articles.push(Ok(article));
        self
    }

    /// Append an article that fails to decode.
    pub fn with_malformed_article(mut self, error: ArticleError) -> Self {
        self.articles.push(Err(error));
        self
    }

    /// Make `search_ids` fail.
    pub fn failing_search(mut self, message: impl Into<String>) -> Self {
        self.search_failure = Some(message.into());
        self
    }

    /// Make `fetch_articles` fail.
    pub fn failing_fetch(mut self, message: impl Into<String>) -> Self {
        self.fetch_failure = Some(message.into());
        self
    }

    /// Number of `search_ids` calls so far.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_articles` calls so far.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LiteratureSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn search_ids(&self, query: &SearchQuery) -> Result<Vec<String>, SourceError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        match &self.search_failure {
            Some(message) => Err(SourceError::Network(message.clone())),
            None => Ok(self.ids.iter().take(query.max_results).cloned().collect()),
        }
    }

    async fn fetch_articles(&self, _ids: &[String]) -> Result<Vec<ArticleResult>, SourceError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        match &self.fetch_failure {
            Some(message) => Err(SourceError::Network(message.clone())),
            None => Ok(self.articles.clone()),
        }
    }
}
