//! Cascading department → team → manager selection.
//!
//! Shared by the report form and the table filter. Each level's options
//! depend on the level above it, so changing a level clears everything
//! below it.

use std::fmt;

use crate::model::ReferenceHierarchy;

/// One level of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Department,
    Team,
    Manager,
}

impl Level {
    /// The level whose choice determines this level's options.
    pub fn parent(self) -> Option<Self> {
        match self {
            Self::Department => None,
            Self::Team => Some(Self::Department),
            Self::Manager => Some(Self::Team),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Department => "department",
            Self::Team => "team",
            Self::Manager => "reporting manager",
        })
    }
}

/// Errors from choosing a value at some level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("choose a {parent} before choosing a {level}")]
    ParentUnset { level: Level, parent: Level },

    #[error("'{value}' is not a {level} option here (choices: {})", .choices.join(", "))]
    NotAnOption {
        level: Level,
        value: String,
        choices: Vec<String>,
    },
}

/// The current department/team/manager choice. Empty strings mean unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    department: String,
    team: String,
    manager: String,
}

impl Selection {
    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn manager(&self) -> &str {
        &self.manager
    }

    pub fn get(&self, level: Level) -> &str {
        match level {
            Level::Department => &self.department,
            Level::Team => &self.team,
            Level::Manager => &self.manager,
        }
    }

    /// True when no level is chosen.
    pub fn is_empty(&self) -> bool {
        self.department.is_empty() && self.team.is_empty() && self.manager.is_empty()
    }

    /// The values currently offered at `level`, given the levels above it.
    pub fn options<'h>(&self, level: Level, hierarchy: &'h ReferenceHierarchy) -> Vec<&'h str> {
        match level {
            Level::Department => hierarchy.departments(),
            Level::Team => hierarchy.teams_for_department(&self.department),
            Level::Manager => hierarchy.managers_for_team(&self.department, &self.team),
        }
    }

    /// Choose `value` at `level`, clearing every level below it.
    ///
    /// An empty value unsets the level. A non-empty value must be one of the
    /// current [`options`](Self::options); on error nothing changes.
    pub fn set(
        &mut self,
        level: Level,
        value: &str,
        hierarchy: &ReferenceHierarchy,
    ) -> Result<(), SelectError> {
        if !value.is_empty() {
            if let Some(parent) = level.parent()
                && self.get(parent).is_empty()
            {
                return Err(SelectError::ParentUnset { level, parent });
            }

            let choices = self.options(level, hierarchy);
            if !choices.contains(&value) {
                return Err(SelectError::NotAnOption {
                    level,
                    value: value.to_string(),
                    choices: choices.into_iter().map(String::from).collect(),
                });
            }
        }

        match level {
            Level::Department => {
                self.department = value.to_string();
                self.team.clear();
                self.manager.clear();
            }
            Level::Team => {
                self.team = value.to_string();
                self.manager.clear();
            }
            Level::Manager => self.manager = value.to_string(),
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_selection(h: &ReferenceHierarchy) -> Selection {
        let mut s = Selection::default();
        s.set(Level::Department, "Engineering", h).unwrap();
        s.set(Level::Team, "Backend", h).unwrap();
        s.set(Level::Manager, "Alice", h).unwrap();
        s
    }

    #[test]
    fn changing_department_clears_team_and_manager() {
        let h = ReferenceHierarchy::default();
        let mut s = full_selection(&h);

        s.set(Level::Department, "Sales", &h).unwrap();
        assert_eq!(s.department(), "Sales");
        assert_eq!(s.team(), "");
        assert_eq!(s.manager(), "");
    }

    #[test]
    fn changing_team_clears_manager_only() {
        let h = ReferenceHierarchy::default();
        let mut s = full_selection(&h);

        s.set(Level::Team, "Frontend", &h).unwrap();
        assert_eq!(s.department(), "Engineering");
        assert_eq!(s.team(), "Frontend");
        assert_eq!(s.manager(), "");
    }

    #[test]
    fn reselecting_same_department_still_clears() {
        let h = ReferenceHierarchy::default();
        let mut s = full_selection(&h);

        s.set(Level::Department, "Engineering", &h).unwrap();
        assert_eq!(s.team(), "");
        assert_eq!(s.manager(), "");
    }

    #[test]
    fn setting_manager_leaves_ancestors() {
        let h = ReferenceHierarchy::default();
        let mut s = full_selection(&h);

        s.set(Level::Manager, "Rahul Mehta", &h).unwrap();
        assert_eq!(s.department(), "Engineering");
        assert_eq!(s.team(), "Backend");
        assert_eq!(s.manager(), "Rahul Mehta");
    }

    #[test]
    fn empty_value_unsets_and_cascades() {
        let h = ReferenceHierarchy::default();
        let mut s = full_selection(&h);

        s.set(Level::Department, "", &h).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn team_requires_department() {
        let h = ReferenceHierarchy::default();
        let mut s = Selection::default();

        let err = s.set(Level::Team, "Backend", &h).unwrap_err();
        assert_eq!(
            err,
            SelectError::ParentUnset {
                level: Level::Team,
                parent: Level::Department,
            }
        );
    }

    #[test]
    fn rejects_value_outside_options_without_mutation() {
        let h = ReferenceHierarchy::default();
        let mut s = full_selection(&h);
        let before = s.clone();

        let err = s.set(Level::Team, "Enterprise", &h).unwrap_err();
        assert!(matches!(err, SelectError::NotAnOption { level: Level::Team, .. }));
        assert_eq!(s, before);
    }

    #[test]
    fn options_follow_ancestors() {
        let h = ReferenceHierarchy::default();
        let mut s = Selection::default();
        assert!(s.options(Level::Team, &h).is_empty());
        assert!(s.options(Level::Manager, &h).is_empty());

        s.set(Level::Department, "Sales", &h).unwrap();
        assert_eq!(s.options(Level::Team, &h), ["Enterprise", "Inside Sales"]);
    }
}
