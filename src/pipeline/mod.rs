//! The report pipeline: search, fetch, classify, write.
//!
//! Steps run one after another. Remote failures are logged and collapse
//! into empty results here: a failed search looks exactly like a search
//! that found nothing, and a failed fetch like a fetch that returned no
//! articles.

use std::io::Write;
use std::path::PathBuf;

use crate::affiliation::build_report;
use crate::models::{RawArticle, SearchQuery};
use crate::report::{print_rows, write_csv_file, Destination, ReportError};
use crate::sources::LiteratureSource;

/// Inputs of one run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub query: SearchQuery,
    pub destination: Destination,
    /// Print progress markers
    pub debug: bool,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The search yielded no identifiers; nothing was fetched or written
    NoResults,
    /// The report was written to a file
    Saved { path: PathBuf, rows: usize },
    /// Writing the file failed; the error was logged
    SaveFailed { path: PathBuf, rows: usize },
    /// The report was printed
    Printed { rows: usize },
}

/// Search for identifiers, logging failures and returning an empty list
pub async fn search(source: &dyn LiteratureSource, query: &SearchQuery) -> Vec<String> {
    match source.search_ids(query).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!(source = source.id(), "Error searching {}: {}", source.name(), e);
            Vec::new()
        }
    }
}

/// Fetch articles for `ids`.
///
/// A failed batch is logged and yields nothing. Articles that fail to
/// decode are logged and skipped; the rest are kept in order.
pub async fn fetch_details(source: &dyn LiteratureSource, ids: &[String]) -> Vec<RawArticle> {
    let results = match source.fetch_articles(ids).await {
        Ok(results) => results,
        Err(e) => {
            tracing::error!(
                source = source.id(),
                "Error fetching {} details: {}",
                source.name(),
                e
            );
            return Vec::new();
        }
    };

    results
        .into_iter()
        .enumerate()
        .filter_map(|(index, result)| match result {
            Ok(article) => Some(article),
            Err(e) => {
                tracing::warn!(index, "Skipping article: {}", e);
                None
            }
        })
        .collect()
}

/// Run the whole pipeline, writing user-facing messages to `out`.
///
/// Only failures to write to `out` itself are returned as errors.
pub async fn run<W: Write>(
    source: &dyn LiteratureSource,
    options: &RunOptions,
    out: &mut W,
) -> Result<RunOutcome, ReportError> {
    if options.debug {
        writeln!(out, "Searching {} for: {}", source.name(), options.query.query)?;
    }

    let ids = search(source, &options.query).await;

    if options.debug {
        writeln!(out, "Found {} papers.", ids.len())?;
    }

    if ids.is_empty() {
        writeln!(out, "No papers found. Exiting.")?;
        return Ok(RunOutcome::NoResults);
    }

    let articles = fetch_details(source, &ids).await;
    let rows = build_report(&articles);

    if options.debug {
        writeln!(out, "Processed {} papers.", rows.len())?;
    }

    match &options.destination {
        Destination::File(path) => match write_csv_file(&rows, path) {
            Ok(()) => {
                writeln!(out, "Results saved to {}", path.display())?;
                Ok(RunOutcome::Saved {
                    path: path.clone(),
                    rows: rows.len(),
                })
            }
            Err(e) => {
                tracing::error!(path = %path.display(), "Error saving CSV: {}", e);
                Ok(RunOutcome::SaveFailed {
                    path: path.clone(),
                    rows: rows.len(),
                })
            }
        },
        Destination::Console(format) => {
            print_rows(&rows, *format, out)?;
            Ok(RunOutcome::Printed { rows: rows.len() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawAuthor, ReportRow};
    use crate::report::ConsoleFormat;
    use crate::sources::{ArticleError, MockSource};
    use tempfile::tempdir;

    fn academic_article() -> RawArticle {
        RawArticle::new()
            .pmid("111")
            .title("Academic paper")
            .pub_year("2020")
            .author(RawAuthor::new("Ann", "Lee").affiliation("Stanford University"))
    }

    fn industry_article() -> RawArticle {
        RawArticle::new()
            .pmid("222")
            .title("Industry paper")
            .pub_year("2021")
            .author(RawAuthor::new("Dan", "Ng").affiliation("Acme Pharma"))
    }

    fn options(destination: Destination, debug: bool) -> RunOptions {
        RunOptions {
            query: SearchQuery::new("cancer"),
            destination,
            debug,
        }
    }

    async fn run_to_string(source: &MockSource, options: &RunOptions) -> (RunOutcome, String) {
        let mut out = Vec::new();
        let outcome = run(source, options, &mut out).await.unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_no_results_skips_fetch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let source = MockSource::new().with_article(industry_article());

        let (outcome, text) =
            run_to_string(&source, &options(Destination::File(path.clone()), false)).await;

        assert_eq!(outcome, RunOutcome::NoResults);
        assert_eq!(text, "No papers found. Exiting.\n");
        assert_eq!(source.search_calls(), 1);
        assert_eq!(source.fetch_calls(), 0);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_search_looks_like_no_results() {
        let source = MockSource::new()
            .with_ids(["111"])
            .failing_search("connection refused");

        let (outcome, text) = run_to_string(
            &source,
            &options(Destination::Console(ConsoleFormat::Json), false),
        )
        .await;

        assert_eq!(outcome, RunOutcome::NoResults);
        assert!(text.contains("No papers found. Exiting."));
        assert_eq!(source.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn test_cancer_scenario_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let source = MockSource::new()
            .with_ids(["111", "222"])
            .with_article(academic_article())
            .with_article(industry_article());

        let (outcome, text) =
            run_to_string(&source, &options(Destination::File(path.clone()), false)).await;

        assert_eq!(
            outcome,
            RunOutcome::Saved {
                path: path.clone(),
                rows: 2
            }
        );
        assert_eq!(text, format!("Results saved to {}\n", path.display()));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<ReportRow> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].non_academic_authors, "N/A");
        assert_eq!(rows[0].company_affiliations, "N/A");
        assert_eq!(rows[1].non_academic_authors, "Dan Ng");
        assert_eq!(rows[1].company_affiliations, "Acme Pharma");
        assert_eq!(rows[1].corresponding_author_email, "N/A");
    }

    #[tokio::test]
    async fn test_debug_markers() {
        let source = MockSource::new()
            .with_ids(["111", "222"])
            .with_article(academic_article())
            .with_article(industry_article());

        let (_, text) = run_to_string(
            &source,
            &options(Destination::Console(ConsoleFormat::Plain), true),
        )
        .await;

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Searching Mock Source for: cancer");
        assert_eq!(lines[1], "Found 2 papers.");
        assert_eq!(lines[2], "Processed 2 papers.");
    }

    #[tokio::test]
    async fn test_debug_markers_with_no_results() {
        let source = MockSource::new();

        let (_, text) = run_to_string(
            &source,
            &options(Destination::Console(ConsoleFormat::Plain), true),
        )
        .await;

        assert_eq!(
            text,
            "Searching Mock Source for: cancer\nFound 0 papers.\nNo papers found. Exiting.\n"
        );
    }

    #[tokio::test]
    async fn test_failed_fetch_writes_header_only_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let source = MockSource::new()
            .with_ids(["111"])
            .failing_fetch("timed out");

        let (outcome, _) =
            run_to_string(&source, &options(Destination::File(path.clone()), false)).await;

        assert_eq!(
            outcome,
            RunOutcome::Saved {
                path: path.clone(),
                rows: 0
            }
        );
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("PubmedID,"));
    }

    #[tokio::test]
    async fn test_malformed_article_is_skipped() {
        let source = MockSource::new()
            .with_ids(["111", "999", "222"])
            .with_article(academic_article())
            .with_malformed_article(ArticleError::Xml("unrecognized entity".to_string()))
            .with_article(industry_article());

        let articles = fetch_details(&source, &["111".to_string()]).await;
        assert_eq!(articles, vec![academic_article(), industry_article()]);

        let (outcome, text) = run_to_string(
            &source,
            &options(Destination::Console(ConsoleFormat::Json), false),
        )
        .await;
        assert_eq!(outcome, RunOutcome::Printed { rows: 2 });

        let rows: Vec<ReportRow> = serde_json::from_str(&text).unwrap();
        assert_eq!(rows[0].pubmed_id, "111");
        assert_eq!(rows[1].pubmed_id, "222");
    }

    #[tokio::test]
    async fn test_save_failure_is_reported_not_raised() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let source = MockSource::new()
            .with_ids(["222"])
            .with_article(industry_article());

        let (outcome, text) =
            run_to_string(&source, &options(Destination::File(path.clone()), false)).await;

        assert_eq!(outcome, RunOutcome::SaveFailed { path, rows: 1 });
        assert!(!text.contains("Results saved"));
    }

    #[tokio::test]
    async fn test_search_respects_max_results() {
        let source = MockSource::new().with_ids(["1", "2", "3"]);
        let ids = search(&source, &SearchQuery::new("cancer").max_results(2)).await;
        assert_eq!(ids, vec!["1", "2"]);
    }
}
