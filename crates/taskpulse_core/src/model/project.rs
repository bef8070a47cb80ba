//! Project record.

use serde::{Deserialize, Serialize};

/// Integer key used by the data layer for projects.
pub type ProjectId = i64;

/// Project as returned by `listProjects()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    /// Display name, also the haystack for fuzzy matching.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Raw ISO instant.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Raw ISO instant. A set end date marks the project as completed.
    #[serde(default)]
    pub end_date: Option<String>,
}

impl Project {
    /// Creates a project with only the required fields set.
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Returns whether the project is still running (no end date recorded).
    pub fn is_active(&self) -> bool {
        self.end_date
            .as_deref()
            .map_or(true, |value| value.trim().is_empty())
    }
}
