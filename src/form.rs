//! Report form state and the validation gate in front of submission.

use std::fmt;

use jiff::{Timestamp, civil::Date};
use uuid::Uuid;

use crate::model::{ReferenceHierarchy, Status, UnknownStatus, WorkReport};
use crate::selection::{Level, SelectError, Selection};

/// A field on the report form. All of them are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Department,
    Team,
    ReportingManager,
    EmployeeName,
    Date,
    Tasks,
    Status,
}

impl FormField {
    pub const ALL: [Self; 7] = [
        Self::Department,
        Self::Team,
        Self::ReportingManager,
        Self::EmployeeName,
        Self::Date,
        Self::Tasks,
        Self::Status,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Department => "Department",
            Self::Team => "Team",
            Self::ReportingManager => "Reporting Manager",
            Self::EmployeeName => "Employee Name",
            Self::Date => "Date",
            Self::Tasks => "Tasks",
            Self::Status => "Status",
        }
    }

    /// The cascade level behind a select field, if it is one.
    pub fn level(self) -> Option<Level> {
        match self {
            Self::Department => Some(Level::Department),
            Self::Team => Some(Level::Team),
            Self::ReportingManager => Some(Level::Manager),
            _ => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors from editing a single form field.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error(transparent)]
    Select(#[from] SelectError),

    #[error("invalid date '{value}' (expected YYYY-MM-DD): {source}")]
    InvalidDate { value: String, source: jiff::Error },

    #[error(transparent)]
    InvalidStatus(#[from] UnknownStatus),
}

/// In-progress form input, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    selection: Selection,
    employee_name: String,
    date: Option<Date>,
    tasks: String,
    status: Option<Status>,
}

impl FormState {
    /// A blank form dated `today`.
    pub fn new(today: Date) -> Self {
        Self {
            selection: Selection::default(),
            employee_name: String::new(),
            date: Some(today),
            tasks: String::new(),
            status: None,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn employee_name(&self) -> &str {
        &self.employee_name
    }

    pub fn date(&self) -> Option<Date> {
        self.date
    }

    pub fn tasks(&self) -> &str {
        &self.tasks
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// Update one field. An empty value clears it.
    ///
    /// Select fields cascade: a new department clears team and manager, a
    /// new team clears the manager. On error the form is unchanged.
    pub fn set(
        &mut self,
        field: FormField,
        value: &str,
        hierarchy: &ReferenceHierarchy,
    ) -> Result<(), FieldError> {
        match field {
            FormField::Department => self.selection.set(Level::Department, value, hierarchy)?,
            FormField::Team => self.selection.set(Level::Team, value, hierarchy)?,
            FormField::ReportingManager => self.selection.set(Level::Manager, value, hierarchy)?,
            FormField::EmployeeName => self.employee_name = value.to_string(),
            FormField::Tasks => self.tasks = value.to_string(),
            FormField::Date => {
                self.date = if value.trim().is_empty() {
                    None
                } else {
                    let date = value
                        .trim()
                        .parse::<Date>()
                        .map_err(|source| FieldError::InvalidDate {
                            value: value.to_string(),
                            source,
                        })?;
                    Some(date)
                };
            }
            FormField::Status => {
                self.status = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse::<Status>()?)
                };
            }
        }
        Ok(())
    }

    /// Required fields that are still empty, in form order.
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| match field {
                FormField::Department => self.selection.department().is_empty(),
                FormField::Team => self.selection.team().is_empty(),
                FormField::ReportingManager => self.selection.manager().is_empty(),
                FormField::EmployeeName => self.employee_name.trim().is_empty(),
                FormField::Date => self.date.is_none(),
                FormField::Tasks => self.tasks.trim().is_empty(),
                FormField::Status => self.status.is_none(),
            })
            .collect()
    }

    /// Build a report from a complete form, or list what is missing.
    pub fn to_report(&self, id: Uuid, created_at: Timestamp) -> Result<WorkReport, Vec<FormField>> {
        let missing = self.missing_fields();
        match (self.date, self.status) {
            (Some(date), Some(status)) if missing.is_empty() => Ok(WorkReport {
                id,
                department: self.selection.department().to_string(),
                team: self.selection.team().to_string(),
                reporting_manager: self.selection.manager().to_string(),
                employee_name: self.employee_name.clone(),
                date,
                tasks: self.tasks.clone(),
                status,
                created_at,
            }),
            _ => Err(missing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    fn complete_form(h: &ReferenceHierarchy) -> FormState {
        let mut form = FormState::new(date(2024, 1, 15));
        form.set(FormField::Department, "Engineering", h).unwrap();
        form.set(FormField::Team, "Backend", h).unwrap();
        form.set(FormField::ReportingManager, "Alice", h).unwrap();
        form.set(FormField::EmployeeName, "Bob Smith", h).unwrap();
        form.set(FormField::Tasks, "Fixed bug", h).unwrap();
        form.set(FormField::Status, "Completed", h).unwrap();
        form
    }

    #[test]
    fn new_form_is_dated_and_otherwise_blank() {
        let form = FormState::new(date(2024, 3, 1));
        assert_eq!(form.date(), Some(date(2024, 3, 1)));
        assert_eq!(
            form.missing_fields(),
            [
                FormField::Department,
                FormField::Team,
                FormField::ReportingManager,
                FormField::EmployeeName,
                FormField::Tasks,
                FormField::Status,
            ]
        );
    }

    #[test]
    fn department_then_team_then_department_clears_dependents() {
        let h = ReferenceHierarchy::default();
        let mut form = FormState::new(date(2024, 1, 15));
        form.set(FormField::Department, "Engineering", &h).unwrap();
        form.set(FormField::Team, "Backend", &h).unwrap();
        form.set(FormField::ReportingManager, "Alice", &h).unwrap();
        form.set(FormField::Department, "Sales", &h).unwrap();

        assert_eq!(form.selection().team(), "");
        assert_eq!(form.selection().manager(), "");
    }

    #[test]
    fn text_fields_do_not_cascade() {
        let h = ReferenceHierarchy::default();
        let mut form = complete_form(&h);
        form.set(FormField::EmployeeName, "Carol", &h).unwrap();
        form.set(FormField::Date, "2024-02-01", &h).unwrap();

        assert_eq!(form.selection().manager(), "Alice");
        assert_eq!(form.date(), Some(date(2024, 2, 1)));
    }

    #[test]
    fn each_missing_field_blocks_the_report() {
        let h = ReferenceHierarchy::default();
        for field in FormField::ALL {
            let mut form = complete_form(&h);
            form.set(field, "", &h).unwrap();

            let missing = form.to_report(Uuid::now_v7(), Timestamp::now()).unwrap_err();
            assert!(missing.contains(&field), "{field} should be reported missing");
        }
    }

    #[test]
    fn whitespace_only_text_counts_as_missing() {
        let h = ReferenceHierarchy::default();
        let mut form = complete_form(&h);
        form.set(FormField::Tasks, "   ", &h).unwrap();
        assert_eq!(form.missing_fields(), [FormField::Tasks]);
    }

    #[test]
    fn complete_form_builds_report() {
        let h = ReferenceHierarchy::default();
        let form = complete_form(&h);
        let id = Uuid::now_v7();

        let report = form.to_report(id, Timestamp::UNIX_EPOCH).unwrap();
        assert_eq!(report.id, id);
        assert_eq!(report.department, "Engineering");
        assert_eq!(report.team, "Backend");
        assert_eq!(report.reporting_manager, "Alice");
        assert_eq!(report.employee_name, "Bob Smith");
        assert_eq!(report.date, date(2024, 1, 15));
        assert_eq!(report.tasks, "Fixed bug");
        assert_eq!(report.status, Status::Completed);
    }

    #[test]
    fn bad_date_leaves_previous_value() {
        let h = ReferenceHierarchy::default();
        let mut form = FormState::new(date(2024, 1, 15));

        let err = form.set(FormField::Date, "15/01/2024", &h).unwrap_err();
        assert!(matches!(err, FieldError::InvalidDate { .. }));
        assert_eq!(form.date(), Some(date(2024, 1, 15)));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let h = ReferenceHierarchy::default();
        let mut form = FormState::new(date(2024, 1, 15));

        let err = form.set(FormField::Status, "Paused", &h).unwrap_err();
        assert!(matches!(err, FieldError::InvalidStatus(_)));
        assert_eq!(form.status(), None);
    }
}
