//! In-memory report store.
//!
//! Reports are kept in submission order for the life of the session.
//! Appending goes through [`ReportStore`] so a fallible backend can be
//! swapped in without touching the controller.

use crate::filter::FilterState;
use crate::model::WorkReport;

/// Errors a store can raise while appending.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("report store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = core::result::Result<T, StoreError>;

/// Append-only, ordered collection of submitted reports.
pub trait ReportStore {
    /// Appends a report after every existing one.
    fn append(&mut self, report: WorkReport) -> Result<()>;

    /// All reports, oldest first.
    fn reports(&self) -> &[WorkReport];

    /// Reports passing `filter`, in store order.
    ///
    /// Derived on every call; an empty filter yields the whole store.
    fn visible(&self, filter: &FilterState) -> Vec<&WorkReport> {
        self.reports().iter().filter(|r| filter.matches(r)).collect()
    }
}

/// The session store. Appending never fails.
#[derive(Debug, Default)]
pub struct MemoryStore {
    reports: Vec<WorkReport>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportStore for MemoryStore {
    fn append(&mut self, report: WorkReport) -> Result<()> {
        self.reports.push(report);
        Ok(())
    }

    fn reports(&self) -> &[WorkReport] {
        &self.reports
    }
}
