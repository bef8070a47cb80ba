//! Task record and its status/priority vocabularies.
//!
//! # Invariants
//! - Unknown status/priority labels decode to `None` instead of rejecting the
//!   whole collection.
//! - `Priority` ordering follows importance: `Urgent < High < Medium < Low <
//!   Backlog` (lower is more important).

use crate::model::project::ProjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Integer key used by the data layer for tasks.
pub type TaskId = i64;

/// Task workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    ToDo,
    InProgress,
    UnderReview,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::ToDo,
        TaskStatus::InProgress,
        TaskStatus::UnderReview,
        TaskStatus::Completed,
    ];

    /// Wire label used by the data layer.
    pub fn label(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "Work In Progress",
            Self::UnderReview => "Under Review",
            Self::Completed => "Completed",
        }
    }

    /// Parses a wire label, case-insensitively.
    ///
    /// `"In Progress"` is accepted as an alias of `Work In Progress`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "to do" | "todo" => Some(Self::ToDo),
            "work in progress" | "in progress" => Some(Self::InProgress),
            "under review" => Some(Self::UnderReview),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Task priority. Declaration order is importance order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
    Backlog,
}

impl Priority {
    pub const ALL: [Priority; 5] = [
        Priority::Urgent,
        Priority::High,
        Priority::Medium,
        Priority::Low,
        Priority::Backlog,
    ];

    /// Wire label used by the data layer.
    pub fn label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Backlog => "Backlog",
        }
    }

    /// Parses a wire label, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "urgent" => Some(Self::Urgent),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            "backlog" => Some(Self::Backlog),
            _ => None,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Task as returned by `listTasks()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(
        default,
        serialize_with = "serialize_status",
        deserialize_with = "deserialize_status"
    )]
    pub status: Option<TaskStatus>,
    #[serde(
        default,
        serialize_with = "serialize_priority",
        deserialize_with = "deserialize_priority"
    )]
    pub priority: Option<Priority>,
    /// Missing means the task belongs to no known project.
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    /// Raw ISO instant.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Raw ISO instant.
    #[serde(default)]
    pub due_date: Option<String>,
}

impl Task {
    /// Creates a task with only the required fields set.
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            status: None,
            priority: None,
            project_id: None,
            created_at: None,
            due_date: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == Some(TaskStatus::Completed)
    }

    /// Status label for display, `No status` when absent.
    pub fn status_label(&self) -> &'static str {
        self.status.map_or("No status", TaskStatus::label)
    }

    /// Priority label for display, `Not set` when absent.
    pub fn priority_label(&self) -> &'static str {
        self.priority.map_or("Not set", Priority::label)
    }
}

fn serialize_status<S: Serializer>(
    value: &Option<TaskStatus>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(status) => serializer.serialize_str(status.label()),
        None => serializer.serialize_none(),
    }
}

fn deserialize_status<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<TaskStatus>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(TaskStatus::parse))
}

fn serialize_priority<S: Serializer>(
    value: &Option<Priority>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(priority) => serializer.serialize_str(priority.label()),
        None => serializer.serialize_none(),
    }
}

fn deserialize_priority<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Priority>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Priority::parse))
}

#[cfg(test)]
mod tests {
    use super::{Priority, TaskStatus};

    #[test]
    fn status_parse_accepts_labels_and_alias() {
        assert_eq!(TaskStatus::parse("Completed"), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::parse(" to do "), Some(TaskStatus::ToDo));
        assert_eq!(
            TaskStatus::parse("In Progress"),
            Some(TaskStatus::InProgress)
        );
        assert_eq!(TaskStatus::parse("blocked"), None);
    }

    #[test]
    fn priority_order_follows_importance() {
        assert!(Priority::Urgent < Priority::High);
        assert!(Priority::Low < Priority::Backlog);
        let mut shuffled = vec![Priority::Low, Priority::Urgent, Priority::Backlog];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Priority::Urgent, Priority::Low, Priority::Backlog]
        );
    }
}
