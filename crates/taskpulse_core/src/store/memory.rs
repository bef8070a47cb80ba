//! In-process store backed by owned vectors.
//!
//! Used by tests and by callers that already hold the data (for example a
//! JSON export). `replace` swaps the collections without touching snapshots
//! captured earlier.

use crate::model::project::Project;
use crate::model::task::Task;
use crate::store::{EntityStore, StoreResult, TaskFilter};
use async_trait::async_trait;
use parking_lot::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<(Vec<Project>, Vec<Task>)>,
}

impl InMemoryStore {
    pub fn new(projects: Vec<Project>, tasks: Vec<Task>) -> Self {
        Self {
            data: RwLock::new((projects, tasks)),
        }
    }

    /// Replaces both collections atomically.
    pub fn replace(&self, projects: Vec<Project>, tasks: Vec<Task>) {
        *self.data.write() = (projects, tasks);
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(self.data.read().0.clone())
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        Ok(self
            .data
            .read()
            .1
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect())
    }
}
