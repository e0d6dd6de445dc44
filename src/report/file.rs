//! CSV report writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::ReportError;
use crate::models::{ReportRow, REPORT_HEADER};

/// Write the header and one record per row to `writer`.
///
/// The header is always written, so an empty report yields a header-only
/// document.
pub fn write_csv<W: Write>(rows: &[ReportRow], writer: W) -> Result<(), ReportError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(REPORT_HEADER)?;
    for row in rows {
        wtr.write_record(row.fields())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the report to it
pub fn write_csv_file(rows: &[ReportRow], path: &Path) -> Result<(), ReportError> {
    let file = File::create(path)?;
    write_csv(rows, file)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "CSV report written");
    Ok(())
}
