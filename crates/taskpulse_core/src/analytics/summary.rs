//! Priority dashboard breakdowns.
//!
//! # Responsibility
//! - Filter and sort tasks the way the priority dashboard lists them.
//! - Summarize a task selection by priority and by project.
//!
//! # Invariants
//! - Sorting is stable: ties keep the input (store) order.
//! - Project grouping preserves first-seen order.

use crate::model::project::ProjectId;
use crate::model::snapshot::Snapshot;
use crate::model::task::{Priority, Task};
use crate::model::time::parse_optional;
use crate::store::TaskFilter;
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// Sort key for dashboard task lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskSort {
    #[default]
    Priority,
    Project,
    Title,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Dashboard selection criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Dashboard project selector; `None` means every project.
    pub project_id: Option<ProjectId>,
    pub priority: Option<Priority>,
    /// Inclusive creation-day range, in `offset` local time.
    pub created_between: Option<(NaiveDate, NaiveDate)>,
    pub offset: Option<FixedOffset>,
    pub sort: TaskSort,
    pub direction: SortDirection,
}

/// Counters for the four charted priorities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    #[serde(rename = "Urgent")]
    pub urgent: usize,
    #[serde(rename = "High")]
    pub high: usize,
    #[serde(rename = "Medium")]
    pub medium: usize,
    #[serde(rename = "Low")]
    pub low: usize,
}

impl PriorityCounts {
    fn record(&mut self, priority: Option<Priority>) {
        match priority {
            Some(Priority::Urgent) => self.urgent += 1,
            Some(Priority::High) => self.high += 1,
            Some(Priority::Medium) => self.medium += 1,
            Some(Priority::Low) => self.low += 1,
            Some(Priority::Backlog) | None => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCount {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPriorities {
    pub name: String,
    #[serde(flatten)]
    pub counts: PriorityCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Distinct project ids referenced by the selection.
    pub active_projects: usize,
    pub urgent_high_tasks: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub priority_distribution: PriorityCounts,
    pub tasks_per_project: Vec<ProjectCount>,
    pub project_priorities: Vec<ProjectPriorities>,
    pub stats: SummaryStats,
}

/// Selects and orders tasks from the snapshot.
pub fn filter_tasks<'a>(snapshot: &'a Snapshot, query: &TaskQuery) -> Vec<&'a Task> {
    let offset = query.offset.unwrap_or_else(utc);
    let scope = TaskFilter {
        project_id: query.project_id,
    };
    let mut selected: Vec<&Task> = snapshot
        .tasks()
        .iter()
        .filter(|task| scope.matches(task))
        .filter(|task| query.priority.map_or(true, |wanted| task.priority == Some(wanted)))
        .filter(|task| match query.created_between {
            Some((from, to)) => created_day(task, offset).is_some_and(|day| from <= day && day <= to),
            None => true,
        })
        .collect();

    selected.sort_by(|a, b| {
        let ordering = match query.sort {
            TaskSort::Priority => priority_rank(a).cmp(&priority_rank(b)),
            TaskSort::Project => project_name(snapshot, a).cmp(&project_name(snapshot, b)),
            TaskSort::Title => a.title.cmp(&b.title),
        };
        match query.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    selected
}

/// Builds the dashboard breakdowns for a task selection.
pub fn summarize(snapshot: &Snapshot, tasks: &[&Task]) -> DashboardSummary {
    let mut summary = DashboardSummary::default();
    let mut projects_seen: HashSet<ProjectId> = HashSet::new();

    for task in tasks {
        summary.priority_distribution.record(task.priority);

        let label = grouping_label(snapshot, task);
        match summary
            .tasks_per_project
            .iter_mut()
            .find(|entry| entry.name == label)
        {
            Some(entry) => entry.value += 1,
            None => summary.tasks_per_project.push(ProjectCount {
                name: label.clone(),
                value: 1,
            }),
        }
        let index = match summary
            .project_priorities
            .iter()
            .position(|entry| entry.name == label)
        {
            Some(index) => index,
            None => {
                summary.project_priorities.push(ProjectPriorities {
                    name: label,
                    counts: PriorityCounts::default(),
                });
                summary.project_priorities.len() - 1
            }
        };
        summary.project_priorities[index].counts.record(task.priority);

        if let Some(id) = task.project_id {
            projects_seen.insert(id);
        }
        if task.is_completed() {
            summary.stats.completed_tasks += 1;
        }
        if matches!(task.priority, Some(Priority::Urgent | Priority::High)) {
            summary.stats.urgent_high_tasks += 1;
        }
    }

    summary.stats.total_tasks = tasks.len();
    summary.stats.active_projects = projects_seen.len();
    summary
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn created_day(task: &Task, offset: FixedOffset) -> Option<NaiveDate> {
    match parse_optional(task.created_at.as_deref())? {
        Ok(instant) => Some(instant.with_timezone(&offset).date_naive()),
        Err(_) => None,
    }
}

/// Urgent..Low map to 0..3; Backlog and missing share rank 4.
fn priority_rank(task: &Task) -> u8 {
    match task.priority {
        Some(Priority::Urgent) => 0,
        Some(Priority::High) => 1,
        Some(Priority::Medium) => 2,
        Some(Priority::Low) => 3,
        Some(Priority::Backlog) | None => 4,
    }
}

/// Resolved project name for sorting; empty when unresolved.
fn project_name<'a>(snapshot: &'a Snapshot, task: &Task) -> &'a str {
    task.project_id
        .and_then(|id| snapshot.project(id))
        .map_or("", |project| project.name.as_str())
}

/// Resolved project name for grouping; `Unknown` when unresolved.
fn grouping_label(snapshot: &Snapshot, task: &Task) -> String {
    match project_name(snapshot, task) {
        "" => "Unknown".to_string(),
        name => name.to_string(),
    }
}
