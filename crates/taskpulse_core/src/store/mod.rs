//! Entity store accessor contracts.
//!
//! # Responsibility
//! - Define the read-only fetch interface the external data layer provides.
//! - Capture one consistent `Snapshot` per core invocation.
//!
//! # Invariants
//! - Core only reads through `EntityStore`; it never writes.
//! - A failed fetch degrades to an empty collection, never to a crash.

pub mod memory;
pub mod sqlite;

use crate::db::DbError;
use crate::model::project::{Project, ProjectId};
use crate::model::snapshot::Snapshot;
use crate::model::task::Task;
use async_trait::async_trait;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Transient failure raised by a store implementation.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Backend unreachable (network, auth, closed handle).
    Unavailable(String),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
            Self::InvalidData(message) => write!(f, "invalid store data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Optional filter for `list_tasks`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub project_id: Option<ProjectId>,
}

impl TaskFilter {
    pub fn for_project(project_id: ProjectId) -> Self {
        Self {
            project_id: Some(project_id),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self.project_id {
            Some(id) => task.project_id == Some(id),
            None => true,
        }
    }
}

/// Read-only interface of the external data layer.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn list_projects(&self) -> StoreResult<Vec<Project>>;
    async fn list_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>>;
}

/// Captures a snapshot of both collections.
///
/// Each failed call is logged and replaced by an empty collection, so callers
/// always get a usable (possibly empty) snapshot.
pub async fn fetch_snapshot<S: EntityStore + ?Sized>(store: &S) -> Snapshot {
    let started_at = Instant::now();

    let projects = match store.list_projects().await {
        Ok(projects) => projects,
        Err(err) => {
            warn!(
                "event=snapshot_fetch module=store status=error collection=projects error={err}"
            );
            Vec::new()
        }
    };
    let tasks = match store.list_tasks(&TaskFilter::default()).await {
        Ok(tasks) => tasks,
        Err(err) => {
            warn!("event=snapshot_fetch module=store status=error collection=tasks error={err}");
            Vec::new()
        }
    };

    debug!(
        "event=snapshot_fetch module=store status=ok projects={} tasks={} duration_ms={}",
        projects.len(),
        tasks.len(),
        started_at.elapsed().as_millis()
    );
    Snapshot::new(projects, tasks)
}
