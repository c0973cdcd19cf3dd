//! Table filter: narrows the visible reports by department, team, and manager.

use crate::model::{ReferenceHierarchy, WorkReport};
use crate::selection::{Level, SelectError, Selection};

/// Filter over the report table. An unset level places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    selection: Selection,
}

impl FilterState {
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Change one level, with the same cascading clear as the form.
    pub fn set(
        &mut self,
        level: Level,
        value: &str,
        hierarchy: &ReferenceHierarchy,
    ) -> Result<(), SelectError> {
        self.selection.set(level, value, hierarchy)
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// Whether `report` passes every level that is set (exact, case-sensitive).
    pub fn matches(&self, report: &WorkReport) -> bool {
        let s = &self.selection;
        (s.department().is_empty() || report.department == s.department())
            && (s.team().is_empty() || report.team == s.team())
            && (s.manager().is_empty() || report.reporting_manager == s.manager())
    }
}
