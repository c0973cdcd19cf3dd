//! CSV export of the report table.

use std::{fs, io, path::Path};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use jiff::civil::Date;

use crate::model::WorkReport;

/// Default export file name.
pub const DEFAULT_FILE_NAME: &str = "work_reports.csv";

/// US-style `M/D/YYYY`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

pub const HEADER: [&str; 7] = [
    "Date",
    "Employee Name",
    "Department",
    "Team",
    "Reporting Manager",
    "Status",
    "Tasks",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No data to export")]
    Empty,

    #[error("invalid date format: {0}")]
    DateFormat(#[from] jiff::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = core::result::Result<T, ExportError>;

/// A rendered CSV document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    pub contents: String,

    /// Data rows, not counting the header.
    pub rows: usize,
}

/// Pick what to export: the visible reports, or every report when nothing
/// is visible. Fails when both are empty.
pub fn rows_to_export<'a>(
    visible: Vec<&'a WorkReport>,
    all: &'a [WorkReport],
) -> Result<Vec<&'a WorkReport>> {
    if !visible.is_empty() {
        return Ok(visible);
    }
    if all.is_empty() {
        return Err(ExportError::Empty);
    }
    Ok(all.iter().collect())
}

/// Format a calendar date with a strftime pattern.
pub fn format_date(date: Date, format: &str) -> core::result::Result<String, jiff::Error> {
    jiff::fmt::strtime::format(format, date)
}

/// Render `reports` as CSV: header first, every cell quoted, lines joined
/// with `\n` and no newline after the last row.
pub fn to_csv(reports: &[&WorkReport], date_format: &str) -> Result<CsvDocument> {
    if reports.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for report in reports {
        let date = format_date(report.date, date_format)?;
        writer.write_record([
            date.as_str(),
            report.employee_name.as_str(),
            report.department.as_str(),
            report.team.as_str(),
            report.reporting_manager.as_str(),
            report.status.label(),
            report.tasks.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let mut contents = String::from_utf8(bytes).map_err(io::Error::other)?;
    if contents.ends_with('\n') {
        contents.pop();
    }

    Ok(CsvDocument {
        contents,
        rows: reports.len(),
    })
}

/// Write a rendered document to `path`, replacing any existing file.
pub fn write_csv(path: &Path, document: &CsvDocument) -> Result<()> {
    fs::write(path, &document.contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::{Timestamp, civil::date};
    use tempfile::TempDir;
    use uuid::Uuid;

    use crate::model::Status;

    fn report(employee: &str, tasks: &str) -> WorkReport {
        WorkReport {
            id: Uuid::now_v7(),
            department: "Engineering".into(),
            team: "Backend".into(),
            reporting_manager: "Alice".into(),
            employee_name: employee.into(),
            date: date(2024, 1, 15),
            tasks: tasks.into(),
            status: Status::Completed,
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn renders_header_and_quoted_rows() {
        let r = report("Bob Smith", "Fixed bug");
        let doc = to_csv(&[&r], DEFAULT_DATE_FORMAT).unwrap();

        assert_eq!(
            doc.contents,
            "\"Date\",\"Employee Name\",\"Department\",\"Team\",\"Reporting Manager\",\"Status\",\"Tasks\"\n\
             \"1/15/2024\",\"Bob Smith\",\"Engineering\",\"Backend\",\"Alice\",\"Completed\",\"Fixed bug\""
        );
        assert_eq!(doc.rows, 1);
    }

    #[test]
    fn line_count_is_rows_plus_header() {
        let reports = [report("A", "x"), report("B", "y"), report("C", "z")];
        let refs: Vec<&WorkReport> = reports.iter().collect();
        let doc = to_csv(&refs, DEFAULT_DATE_FORMAT).unwrap();

        assert!(!doc.contents.ends_with('\n'));
        let lines: Vec<&str> = doc.contents.split('\n').collect();
        assert_eq!(lines.len(), 4);
        for line in lines {
            for cell in line.split("\",\"") {
                assert!(!cell.is_empty());
            }
            assert!(line.starts_with('"') && line.ends_with('"'), "{line}");
        }
    }

    #[test]
    fn escapes_embedded_quotes_and_keeps_commas() {
        let r = report("Bob", "Reviewed \"auth\", merged");
        let doc = to_csv(&[&r], DEFAULT_DATE_FORMAT).unwrap();
        assert!(doc.contents.ends_with("\"Reviewed \"\"auth\"\", merged\""));
    }

    #[test]
    fn honors_date_format() {
        let r = report("Bob", "x");
        let doc = to_csv(&[&r], "%Y-%m-%d").unwrap();
        assert!(doc.contents.contains("\"2024-01-15\""));
    }

    #[test]
    fn falls_back_to_all_when_nothing_visible() {
        let all = vec![report("A", "x"), report("B", "y")];
        let rows = rows_to_export(Vec::new(), &all).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn prefers_visible_rows() {
        let all = vec![report("A", "x"), report("B", "y")];
        let rows = rows_to_export(vec![&all[1]], &all).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_name, "B");
    }

    #[test]
    fn nothing_to_export_is_an_error() {
        let err = rows_to_export(Vec::new(), &[]).unwrap_err();
        assert!(matches!(err, ExportError::Empty));
        assert_eq!(err.to_string(), "No data to export");
    }

    #[test]
    fn writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);
        let r = report("Bob", "x");
        let doc = to_csv(&[&r], DEFAULT_DATE_FORMAT).unwrap();

        write_csv(&path, &doc).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), doc.contents);
    }
}
