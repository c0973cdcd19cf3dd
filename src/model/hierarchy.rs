//! Reference data: the department → team → reporting manager hierarchy.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A department and the teams under it, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub name: String,

    #[serde(rename = "team", default)]
    pub teams: Vec<Team>,
}

/// A team and the managers its members report to, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,

    #[serde(default)]
    pub managers: Vec<String>,
}

/// Read-only organizational lookup used to populate the dependent selects.
///
/// Lookups never fail: an empty or unknown key yields an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceHierarchy {
    departments: Vec<Department>,
}

impl ReferenceHierarchy {
    /// Build a hierarchy, rejecting blank or duplicate names and empty branches.
    ///
    /// Names are stored trimmed, so lookups match what users type.
    pub fn new(mut departments: Vec<Department>) -> Result<Self, String> {
        for department in &mut departments {
            trim_in_place(&mut department.name);
            for team in &mut department.teams {
                trim_in_place(&mut team.name);
                team.managers.iter_mut().for_each(trim_in_place);
            }
        }

        if departments.is_empty() {
            return Err("hierarchy has no departments".to_string());
        }

        let mut seen_departments = HashSet::new();
        for department in &departments {
            let name = department.name.as_str();
            if name.is_empty() {
                return Err("department name is empty".to_string());
            }
            if !seen_departments.insert(name) {
                return Err(format!("department '{name}' is listed twice"));
            }
            if department.teams.is_empty() {
                return Err(format!("department '{name}' has no teams"));
            }

            let mut seen_teams = HashSet::new();
            for team in &department.teams {
                let team_name = team.name.as_str();
                if team_name.is_empty() {
                    return Err(format!("department '{name}' has a team with an empty name"));
                }
                if !seen_teams.insert(team_name) {
                    return Err(format!("team '{team_name}' is listed twice under '{name}'"));
                }
                if team.managers.is_empty() {
                    return Err(format!("team '{team_name}' under '{name}' has no managers"));
                }
                if team.managers.iter().any(|m| m.is_empty()) {
                    return Err(format!(
                        "team '{team_name}' under '{name}' has a manager with an empty name"
                    ));
                }
            }
        }

        Ok(Self { departments })
    }

    /// Department names in display order.
    pub fn departments(&self) -> Vec<&str> {
        self.departments.iter().map(|d| d.name.as_str()).collect()
    }

    /// Team names under `department`, or empty if it is unset or unknown.
    pub fn teams_for_department(&self, department: &str) -> Vec<&str> {
        self.department(department)
            .map(|d| d.teams.iter().map(|t| t.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Manager names for `team` under `department`.
    ///
    /// Empty if either is unset or unknown, or if the team belongs to a
    /// different department.
    pub fn managers_for_team(&self, department: &str, team: &str) -> Vec<&str> {
        self.department(department)
            .and_then(|d| d.teams.iter().find(|t| t.name == team))
            .map(|t| t.managers.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn department(&self, name: &str) -> Option<&Department> {
        if name.is_empty() {
            return None;
        }
        self.departments.iter().find(|d| d.name == name)
    }
}

fn trim_in_place(name: &mut String) {
    let trimmed = name.trim();
    if trimmed.len() != name.len() {
        *name = trimmed.to_string();
    }
}

impl Default for ReferenceHierarchy {
    /// The hierarchy used when no configuration file provides one.
    fn default() -> Self {
        fn team(name: &str, managers: &[&str]) -> Team {
            Team {
                name: name.to_string(),
                managers: managers.iter().map(|m| (*m).to_string()).collect(),
            }
        }

        let departments = vec![
            Department {
                name: "Engineering".to_string(),
                teams: vec![
                    team("Backend", &["Alice", "Rahul Mehta"]),
                    team("Frontend", &["Priya Nair", "Daniel Cho"]),
                    team("QA", &["Sanjay Rao"]),
                ],
            },
            Department {
                name: "Sales".to_string(),
                teams: vec![
                    team("Enterprise", &["Meera Iyer"]),
                    team("Inside Sales", &["Tom Becker", "Anita Das"]),
                ],
            },
            Department {
                name: "Operations".to_string(),
                teams: vec![
                    team("Finance", &["Karan Shah"]),
                    team("HR", &["Lena Fischer"]),
                ],
            },
        ];

        Self { departments }
    }
}
