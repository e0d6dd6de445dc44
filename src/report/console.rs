//! Console rendering of report rows.

use comfy_table::{presets::UTF8_FULL, Table};
use std::io::Write;

use super::ReportError;
use crate::models::{ReportRow, REPORT_HEADER};

/// How rows are rendered on standard output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleFormat {
    /// Bordered table with the report columns
    Table,
    /// Pretty-printed JSON array
    Json,
    /// One text block per row
    Plain,
}

/// Render rows to `out`
pub fn print_rows<W: Write>(
    rows: &[ReportRow],
    format: ConsoleFormat,
    out: &mut W,
) -> Result<(), ReportError> {
    match format {
        ConsoleFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
        ConsoleFormat::Plain => {
            for row in rows {
                writeln!(
                    out,
                    "{} - {} ({})",
                    row.pubmed_id, row.title, row.publication_date
                )?;
                writeln!(out, "  Non-academic authors: {}", row.non_academic_authors)?;
                writeln!(out, "  Company affiliations: {}", row.company_affiliations)?;
                writeln!(out, "  Corresponding email: {}", row.corresponding_author_email)?;
                writeln!(out)?;
            }
        }
        ConsoleFormat::Table => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL).set_header(REPORT_HEADER);

            for row in rows {
                table.add_row(row.fields());
            }
            writeln!(out, "{table}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReportRow {
        ReportRow {
            pubmed_id: "222".to_string(),
            title: "Industry paper".to_string(),
            publication_date: "2021".to_string(),
            non_academic_authors: "Dan Ng".to_string(),
            company_affiliations: "Acme Pharma".to_string(),
            corresponding_author_email: "N/A".to_string(),
        }
    }

    fn render(rows: &[ReportRow], format: ConsoleFormat) -> String {
        let mut out = Vec::new();
        print_rows(rows, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_json_output() {
        let text = render(&[sample()], ConsoleFormat::Json);
        let parsed: Vec<ReportRow> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, vec![sample()]);
        assert!(text.contains("\"Company Affiliation(s)\": \"Acme Pharma\""));
    }

    #[test]
    fn test_json_output_empty() {
        let text = render(&[], ConsoleFormat::Json);
        assert_eq!(text.trim(), "[]");
    }

    #[test]
    fn test_plain_output() {
        let text = render(&[sample()], ConsoleFormat::Plain);
        assert!(text.starts_with("222 - Industry paper (2021)\n"));
        assert!(text.contains("  Non-academic authors: Dan Ng\n"));
        assert!(text.contains("  Corresponding email: N/A\n"));
    }

    #[test]
    fn test_table_output() {
        let text = render(&[sample()], ConsoleFormat::Table);
        assert!(text.contains("PubmedID"));
        assert!(text.contains("222"));
        assert!(text.contains("Acme Pharma"));
    }
}
