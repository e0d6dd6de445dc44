//! Core data models for fetched articles, search requests and report rows.

mod article;
mod report;
mod search;

pub use article::{RawArticle, RawAuthor};
pub use report::{
    join_or_not_available, or_not_available, ReportRow, LIST_SEPARATOR, NOT_AVAILABLE,
    REPORT_HEADER,
};
pub use search::{SearchQuery, DEFAULT_MAX_RESULTS};
