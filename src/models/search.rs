//! Search request model.

/// Default cap on the number of identifiers a search returns
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Search query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Search term passed to the search endpoint as-is
    pub query: String,

    /// Maximum number of identifiers to request
    pub max_results: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl SearchQuery {
    /// Create a new search query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set maximum results
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_max_results() {
        let query = SearchQuery::new("cancer");
        assert_eq!(query.query, "cancer");
        assert_eq!(query.max_results, 10);
    }

    #[test]
    fn test_max_results_override() {
        let query = SearchQuery::new("cancer").max_results(25);
        assert_eq!(query.max_results, 25);
    }
}
