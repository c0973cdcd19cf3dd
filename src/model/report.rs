//! Work report: one submitted entry in the report store.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Status;

/// A submitted daily work report. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkReport {
    /// Time-ordered identifier assigned at submission.
    pub id: Uuid,

    pub department: String,
    pub team: String,
    pub reporting_manager: String,
    pub employee_name: String,

    /// The day the work was done.
    pub date: Date,

    /// Free-text task details.
    pub tasks: String,

    pub status: Status,

    /// When the report was submitted.
    pub created_at: Timestamp,
}
