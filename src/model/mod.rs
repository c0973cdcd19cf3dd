//! Core data model for dayreport.
//!
//! Reference data (the organizational hierarchy and the status set) and the
//! work report record built from a submitted form.

mod hierarchy;
mod report;
mod status;

pub use hierarchy::{Department, ReferenceHierarchy};
pub use report::WorkReport;
pub use status::{Status, StatusTone, UnknownStatus};
