//! Snapshot sources selectable from the command line.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::{Display, Formatter};
use std::path::Path;
use taskpulse_core::{
    EntityStore, InMemoryStore, Project, SqliteEntityStore, StoreError, StoreResult, Task,
    TaskFilter,
};

/// JSON export layout: `{ "projects": [...], "tasks": [...] }`.
#[derive(Debug, Default, Deserialize)]
struct ExportFile {
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Debug)]
pub enum SourceError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Store(StoreError),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read export: {err}"),
            Self::Json(err) => write!(f, "invalid export: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Store backing one CLI invocation.
pub enum SourceStore {
    Sqlite(SqliteEntityStore),
    Memory(InMemoryStore),
}

impl SourceStore {
    pub fn open_sqlite(path: &Path) -> Result<Self, SourceError> {
        SqliteEntityStore::open(path)
            .map(Self::Sqlite)
            .map_err(SourceError::Store)
    }

    pub fn load_json(path: &Path) -> Result<Self, SourceError> {
        let text = std::fs::read_to_string(path).map_err(SourceError::Io)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SourceError> {
        let export: ExportFile = serde_json::from_str(text).map_err(SourceError::Json)?;
        Ok(Self::Memory(InMemoryStore::new(export.projects, export.tasks)))
    }

    pub fn empty() -> Self {
        Self::Memory(InMemoryStore::default())
    }
}

#[async_trait]
impl EntityStore for SourceStore {
    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        match self {
            Self::Sqlite(store) => store.list_projects().await,
            Self::Memory(store) => store.list_projects().await,
        }
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        match self {
            Self::Sqlite(store) => store.list_tasks(filter).await,
            Self::Memory(store) => store.list_tasks(filter).await,
        }
    }
}
