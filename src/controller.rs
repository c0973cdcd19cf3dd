//! Session controller: ties the form, filter, store, and notices together.
//!
//! Every user action maps to one method here. Methods that depend on the
//! clock take it as an argument so the transitions stay deterministic.

use jiff::{Timestamp, Zoned};
use uuid::Uuid;

use crate::export::{self, CsvDocument, ExportError};
use crate::filter::FilterState;
use crate::form::{FieldError, FormField, FormState};
use crate::model::{ReferenceHierarchy, WorkReport};
use crate::notice::{LONG_TTL, Notice, NoticeKind, Notifier, SHORT_TTL};
use crate::selection::{Level, SelectError};
use crate::store::{MemoryStore, ReportStore, StoreError};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields.";
pub const SUBMITTED_MESSAGE: &str = "Report submitted successfully!";
pub const SUBMIT_FAILED_MESSAGE: &str = "Error submitting report. Please try again.";

/// Why a submission did not produce a report.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("missing required fields: {}", .0.iter().map(|f| f.label()).collect::<Vec<_>>().join(", "))]
    MissingFields(Vec<FormField>),

    #[error("failed to store report: {0}")]
    Store(#[from] StoreError),
}

pub struct Controller<S = MemoryStore> {
    hierarchy: ReferenceHierarchy,
    date_format: String,
    form: FormState,
    filter: FilterState,
    store: S,
    notifier: Notifier,
}

impl Controller<MemoryStore> {
    /// A fresh session with an empty in-memory store.
    pub fn new(hierarchy: ReferenceHierarchy, date_format: impl Into<String>, now: &Zoned) -> Self {
        Self::with_store(hierarchy, date_format, now, MemoryStore::new())
    }
}

impl<S: ReportStore> Controller<S> {
    pub fn with_store(
        hierarchy: ReferenceHierarchy,
        date_format: impl Into<String>,
        now: &Zoned,
        store: S,
    ) -> Self {
        Self {
            hierarchy,
            date_format: date_format.into(),
            form: FormState::new(now.date()),
            filter: FilterState::default(),
            store,
            notifier: Notifier::default(),
        }
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Form ──

    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<(), FieldError> {
        self.form.set(field, value, &self.hierarchy)
    }

    /// Choices currently offered for a select field on the form.
    pub fn form_options(&self, level: Level) -> Vec<&str> {
        self.form.selection().options(level, &self.hierarchy)
    }

    /// Validate the form and append a report.
    ///
    /// Posts a notice either way. On success the form resets to a blank
    /// form dated `now`; on failure the form is left as it was.
    pub fn submit(&mut self, now: &Zoned) -> Result<Uuid, SubmitError> {
        let timestamp = now.timestamp();
        let report = match self.form.to_report(Uuid::now_v7(), timestamp) {
            Ok(report) => report,
            Err(missing) => {
                tracing::debug!(?missing, "submission rejected");
                self.notifier
                    .post(NoticeKind::Error, MISSING_FIELDS_MESSAGE, SHORT_TTL, timestamp);
                return Err(SubmitError::MissingFields(missing));
            }
        };

        let id = report.id;
        if let Err(e) = self.store.append(report) {
            tracing::error!(error = %e, "failed to store report");
            self.notifier
                .post(NoticeKind::Error, SUBMIT_FAILED_MESSAGE, LONG_TTL, timestamp);
            return Err(e.into());
        }

        tracing::info!(%id, total = self.store.reports().len(), "report submitted");
        self.notifier
            .post(NoticeKind::Success, SUBMITTED_MESSAGE, SHORT_TTL, timestamp);
        self.form = FormState::new(now.date());
        Ok(id)
    }

    // ── Table ──

    pub fn set_filter(&mut self, level: Level, value: &str) -> Result<(), SelectError> {
        self.filter.set(level, value, &self.hierarchy)?;
        tracing::debug!(filter = ?self.filter.selection(), "filter changed");
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    /// Choices currently offered for a filter level.
    pub fn filter_options(&self, level: Level) -> Vec<&str> {
        self.filter.selection().options(level, &self.hierarchy)
    }

    /// Reports passing the current filter, in submission order.
    pub fn visible(&self) -> Vec<&WorkReport> {
        self.store.visible(&self.filter)
    }

    /// Render the visible reports (or every report, if none are visible).
    pub fn export_csv(&self) -> Result<CsvDocument, ExportError> {
        let rows = export::rows_to_export(self.visible(), self.store.reports())?;
        export::to_csv(&rows, &self.date_format)
    }

    // ── Notices ──

    pub fn active_notice(&self, now: Timestamp) -> Option<&Notice> {
        self.notifier.active(now)
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notifier.dismiss()
    }
}
