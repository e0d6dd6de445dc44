//! Report output.
//!
//! Rows go either to a CSV file ([`write_csv_file`]) or to the console
//! ([`print_rows`]). Neither panics on I/O failure; errors come back as
//! [`ReportError`] for the caller to report.

mod console;
mod file;

pub use console::{print_rows, ConsoleFormat};
pub use file::{write_csv, write_csv_file};

use std::path::PathBuf;

/// Where a report is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// CSV file, created or truncated
    File(PathBuf),
    /// Standard output in the given format
    Console(ConsoleFormat),
}

/// Errors raised while writing a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
