//! Output formatting for session display.

use crate::controller::Controller;
use crate::export::{self, HEADER};
use crate::form::FormField;
use crate::model::{Status, StatusTone, WorkReport};
use crate::notice::{Notice, NoticeKind};
use crate::selection::{Level, Selection};
use crate::store::ReportStore;

/// Longest task text shown in the table before it is cut.
const TASK_PREVIEW_CHARS: usize = 100;

pub(super) fn format_notice(notice: &Notice) -> String {
    let tag = match notice.kind {
        NoticeKind::Success => "ok",
        NoticeKind::Error => "error",
    };
    format!("[{tag}] {}", notice.message)
}

/// Cut task text to the preview length, marking the cut with `...`.
pub(super) fn truncate_tasks(tasks: &str) -> String {
    if tasks.chars().count() > TASK_PREVIEW_CHARS {
        let preview: String = tasks.chars().take(TASK_PREVIEW_CHARS).collect();
        format!("{preview}...")
    } else {
        tasks.to_string()
    }
}

pub(super) fn format_status(label: &str) -> String {
    format!("{} {label}", StatusTone::for_label(label).marker())
}

/// Render the report table, or a placeholder when it is empty.
pub(super) fn format_table(reports: &[&WorkReport], date_format: &str) -> String {
    if reports.is_empty() {
        return "No reports found".to_string();
    }

    let rows: Vec<[String; 7]> = reports
        .iter()
        .map(|r| {
            [
                export::format_date(r.date, date_format).unwrap_or_else(|_| r.date.to_string()),
                r.employee_name.clone(),
                r.department.clone(),
                r.team.clone(),
                r.reporting_manager.clone(),
                format_status(r.status.label()),
                truncate_tasks(&r.tasks),
            ]
        })
        .collect();

    let mut widths = HEADER.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(join_row(HEADER.iter().copied(), &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &rows {
        lines.push(join_row(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn join_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Render the form with the choices each empty select currently offers.
pub(super) fn format_form<S: ReportStore>(controller: &Controller<S>) -> String {
    let form = controller.form();
    let select = |level| select_value(form.selection(), level, &controller.form_options(level));
    let width = FormField::ALL
        .iter()
        .map(|f| f.label().len())
        .max()
        .unwrap_or_default();

    FormField::ALL
        .into_iter()
        .map(|field| {
            let value = match field {
                FormField::Department => select(Level::Department),
                FormField::Team => select(Level::Team),
                FormField::ReportingManager => select(Level::Manager),
                FormField::EmployeeName => text_value(form.employee_name()),
                FormField::Date => form.date().map_or_else(|| "-".to_string(), |d| d.to_string()),
                FormField::Tasks => text_value(form.tasks()),
                FormField::Status => form.status().map_or_else(
                    || format!("- (choose: {})", status_choices()),
                    |s| s.label().to_string(),
                ),
            };
            format!("{:<width$}  {value}", field.label())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the filter, one line per level.
pub(super) fn format_filter<S: ReportStore>(controller: &Controller<S>) -> String {
    let selection = controller.filter().selection();
    [Level::Department, Level::Team, Level::Manager]
        .into_iter()
        .map(|level| {
            let value = selection.get(level);
            let shown = if value.is_empty() { "all" } else { value };
            format!("{level:<17}  {shown}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(super) fn status_choices() -> String {
    Status::ALL
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}

fn select_value(selection: &Selection, level: Level, options: &[&str]) -> String {
    let value = selection.get(level);
    if !value.is_empty() {
        return value.to_string();
    }
    if options.is_empty() {
        "-".to_string()
    } else {
        format!("- (choose: {})", options.join(", "))
    }
}

fn text_value(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}
