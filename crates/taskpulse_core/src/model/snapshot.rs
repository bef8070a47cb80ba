//! Immutable point-in-time view of projects and tasks.
//!
//! # Invariants
//! - A snapshot never changes after construction; clones share storage.
//! - Iteration order is the data layer's order; core never re-sorts it
//!   unless an explicit sort key is requested.

use crate::model::project::{Project, ProjectId};
use crate::model::task::Task;
use std::sync::Arc;

/// Snapshot consumed by classification, formatting and aggregation.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    projects: Arc<[Project]>,
    tasks: Arc<[Task]>,
}

impl Snapshot {
    pub fn new(projects: Vec<Project>, tasks: Vec<Task>) -> Self {
        Self {
            projects: projects.into(),
            tasks: tasks.into(),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Finds a project by key (first match in store order).
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Tasks belonging to one project, in store order.
    pub fn tasks_for_project(&self, id: ProjectId) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |task| task.project_id == Some(id))
    }

    /// Display label for a task's project.
    ///
    /// Resolved project name when present, else the raw project id, else
    /// `Unknown` for tasks without a project.
    pub fn project_label(&self, task: &Task) -> String {
        match task.project_id {
            Some(id) => match self.project(id) {
                Some(project) => project.name.clone(),
                None => id.to_string(),
            },
            None => "Unknown".to_string(),
        }
    }
}
