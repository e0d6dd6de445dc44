//! # get-papers-list
//!
//! Search PubMed and report papers that have at least one author affiliated
//! with a pharmaceutical or biotech company.
//!
//! ## Architecture
//!
//! - [`sources`]: literature sources behind the [`LiteratureSource`] trait (PubMed E-utilities, mock)
//! - [`affiliation`]: academic/company classification and corresponding email
//! - [`report`]: CSV and console output
//! - [`pipeline`]: search, fetch, classify, write
//! - [`models`]: raw article records, report rows, search queries
//! - [`config`]: configuration management
//! - [`utils`]: HTTP client

pub mod affiliation;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{RawArticle, ReportRow, SearchQuery};
pub use sources::{LiteratureSource, PubMedSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
