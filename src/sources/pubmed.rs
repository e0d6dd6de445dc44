//! PubMed source implementation using the NCBI E-utilities API.
//!
//! Endpoints used:
//!   esearch: `{base_url}/esearch.fcgi` (query -> PMIDs)
//!   efetch:  `{base_url}/efetch.fcgi`  (PMIDs -> PubmedArticleSet XML)

use async_trait::async_trait;
use quick_xml::de::from_str;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::{Config, NcbiConfig};
use crate::models::{RawArticle, RawAuthor, SearchQuery};
use crate::sources::{ArticleError, ArticleResult, LiteratureSource, SourceError};
use crate::utils::HttpClient;

/// PubMed research source
///
/// Uses NCBI E-utilities for searching and fetching PubMed records. Every
/// request carries the `tool`/`email`/`api_key` identification taken from
/// [`NcbiConfig`].
#[derive(Debug, Clone)]
pub struct PubMedSource {
    client: Arc<HttpClient>,
    ncbi: NcbiConfig,
}

impl PubMedSource {
    /// Create a new PubMed source from configuration
    pub fn new(config: &Config) -> Result<Self, SourceError> {
        Ok(Self {
            client: Arc::new(HttpClient::new(&config.http)?),
            ncbi: config.ncbi.clone(),
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.ncbi.base_url.trim_end_matches('/'), name)
    }

    /// Parameters NCBI uses to identify the caller
    fn identity_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("tool", self.ncbi.tool.clone())];
        if let Some(email) = &self.ncbi.email {
            params.push(("email", email.clone()));
        }
        if let Some(key) = &self.ncbi.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }

    /// Build E-utilities search parameters
    fn search_params(&self, query: &SearchQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("term", query.query.clone()),
            ("retmax", query.max_results.to_string()),
            ("retmode", "xml".to_string()),
        ];
        params.extend(self.identity_params());
        params
    }

    /// Build E-utilities fetch parameters for specific PubMed IDs
    fn fetch_params(&self, ids: &[String]) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("id", ids.join(",")),
            ("rettype", "xml".to_string()),
            ("retmode", "xml".to_string()),
        ];
        params.extend(self.identity_params());
        params
    }

    async fn get_xml(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<String, SourceError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Api(format!(
                "PubMed API returned status: {}",
                response.status()
            )));
        }

        Ok(response.text().await?)
    }

    /// Parse E-utilities search response XML
    fn parse_search_response(xml: &str) -> Result<Vec<String>, SourceError> {
        #[derive(Debug, Deserialize)]
        struct ESearchResult {
            #[serde(rename = "IdList")]
            id_list: Option<IdList>,
            #[serde(rename = "ERROR")]
            error: Option<String>,
        }

        #[derive(Debug, Deserialize)]
        struct IdList {
            #[serde(rename = "Id", default)]
            ids: Vec<String>,
        }

        let result: ESearchResult = from_str(xml)?;

        match (result.id_list, result.error) {
            (Some(list), _) => Ok(list.ids),
            (None, Some(message)) => Err(SourceError::Api(format!(
                "PubMed search error: {}",
                message.trim()
            ))),
            (None, None) => Ok(Vec::new()),
        }
    }

    /// Parse E-utilities fetch response XML.
    ///
    /// The document as a whole must be well formed; after that each
    /// `PubmedArticle` is decoded on its own so one bad record does not
    /// take down the batch.
    fn parse_fetch_response(xml: &str) -> Result<Vec<ArticleResult>, SourceError> {
        Ok(split_articles(xml)?
            .into_iter()
            .map(parse_article)
            .collect())
    }
}

#[async_trait]
impl LiteratureSource for PubMedSource {
    fn id(&self) -> &str {
        "pubmed"
    }

    fn name(&self) -> &str {
        "PubMed"
    }

    async fn search_ids(&self, query: &SearchQuery) -> Result<Vec<String>, SourceError> {
        let url = self.endpoint("esearch.fcgi");
        tracing::debug!(%url, term = %query.query, retmax = query.max_results, "PubMed esearch");

        let xml = self.get_xml(&url, &self.search_params(query)).await?;
        let ids = Self::parse_search_response(&xml)?;

        tracing::debug!(?ids, "PubMed esearch returned PMIDs");
        Ok(ids)
    }

    async fn fetch_articles(&self, ids: &[String]) -> Result<Vec<ArticleResult>, SourceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.endpoint("efetch.fcgi");
        tracing::debug!(%url, count = ids.len(), "PubMed efetch");

        let xml = self.get_xml(&url, &self.fetch_params(ids)).await?;
        Self::parse_fetch_response(&xml)
    }
}

/// Slice a `PubmedArticleSet` document into one fragment per `PubmedArticle`
fn split_articles(xml: &str) -> Result<Vec<&str>, SourceError> {
    let mut reader = Reader::from_str(xml);
    let mut fragments = Vec::new();

    loop {
        let start = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"PubmedArticle" => {
                let end = e.to_end().into_owned();
                reader
                    .read_to_end(end.name())
                    .map_err(|err| SourceError::Parse(format!("PubMed fetch XML: {}", err)))?;
                let stop = reader.buffer_position() as usize;
                let fragment = xml.get(start..stop).ok_or_else(|| {
                    SourceError::Parse(format!("Invalid article span {}..{}", start, stop))
                })?;
                fragments.push(fragment);
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"ERROR" => {
                let end = e.to_end().into_owned();
                let message = reader
                    .read_text(end.name())
                    .map_err(|err| SourceError::Parse(format!("PubMed fetch XML: {}", err)))?;
                return Err(SourceError::Api(format!(
                    "PubMed fetch error: {}",
                    message.trim()
                )));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(SourceError::Parse(format!("PubMed fetch XML: {}", e)));
            }
        }
    }

    Ok(fragments)
}

/// Fields read out of an article, keyed by the element path that ends in them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Pmid,
    Title,
    Year,
    ForeName,
    LastName,
    Affiliation,
}

const FIELD_PATHS: [(&[&str], Field); 6] = [
    (&["MedlineCitation", "PMID"], Field::Pmid),
    (&["MedlineCitation", "Article", "ArticleTitle"], Field::Title),
    (&["Article", "Journal", "JournalIssue", "PubDate", "Year"], Field::Year),
    (&["AuthorList", "Author", "ForeName"], Field::ForeName),
    (&["AuthorList", "Author", "LastName"], Field::LastName),
    (
        &["AuthorList", "Author", "AffiliationInfo", "Affiliation"],
        Field::Affiliation,
    ),
];

const AUTHOR_PATH: &[&str] = &["AuthorList", "Author"];

fn ends_with(path: &[String], suffix: &[&str]) -> bool {
    path.len() >= suffix.len()
        && path[path.len() - suffix.len()..]
            .iter()
            .zip(suffix)
            .all(|(a, b)| a == b)
}

/// Event-driven decoder for a single `PubmedArticle` fragment
#[derive(Debug, Default)]
struct ArticleParser {
    article: RawArticle,
    author: Option<RawAuthor>,
    path: Vec<String>,
    // field being captured and the depth it was opened at
    capture: Option<(Field, usize)>,
    text: String,
}

impl ArticleParser {
    fn open(&mut self, name: String) {
        self.path.push(name);

        if ends_with(&self.path, AUTHOR_PATH) {
            self.author = Some(RawAuthor::default());
        }

        if self.capture.is_none() {
            let field = FIELD_PATHS
                .iter()
                .find(|(suffix, _)| ends_with(&self.path, suffix))
                .map(|(_, field)| *field);
            if let Some(field) = field {
                self.capture = Some((field, self.path.len()));
                self.text.clear();
            }
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.capture.is_some() {
            self.text.push_str(text);
        }
    }

    fn close(&mut self) {
        if let Some((field, depth)) = self.capture {
            if depth == self.path.len() {
                let value = self.text.trim().to_string();
                self.store(field, value);
                self.capture = None;
            }
        }

        if ends_with(&self.path, AUTHOR_PATH) {
            if let Some(author) = self.author.take() {
                self.article.authors.push(author);
            }
        }

        self.path.pop();
    }

    fn store(&mut self, field: Field, value: String) {
        match field {
            Field::Pmid => self.article.pmid = Some(value),
            Field::Title => self.article.title = Some(value),
            Field::Year => self.article.pub_year = Some(value),
            Field::ForeName => {
                if let Some(author) = self.author.as_mut() {
                    author.fore_name = Some(value);
                }
            }
            Field::LastName => {
                if let Some(author) = self.author.as_mut() {
                    author.last_name = Some(value);
                }
            }
            Field::Affiliation => {
                if let Some(author) = self.author.as_mut() {
                    author.affiliations.push(value);
                }
            }
        }
    }

    fn finish(self) -> RawArticle {
        self.article
    }
}

/// Decode one `PubmedArticle` fragment.
///
/// Inline markup inside captured fields (`<i>`, `<sup>`, ...) is flattened
/// into the surrounding text. Elements that are missing leave their fields
/// unset, so an article without a `MedlineCitation` decodes to an empty
/// record rather than an error.
fn parse_article(fragment: &str) -> ArticleResult {
    let mut reader = Reader::from_str(fragment);
    let mut parser = ArticleParser::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                parser.open(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Event::Empty(e) => {
                parser.open(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                parser.close();
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(|e| ArticleError::Xml(e.to_string()))?;
                parser.push_text(&text);
            }
            Event::CData(e) => {
                parser.push_text(&String::from_utf8_lossy(&e));
            }
            Event::End(_) => parser.close(),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(parser.finish())
}
