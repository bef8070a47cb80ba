//! SQLite-backed entity store.
//!
//! # Responsibility
//! - Serve `listProjects()` / `listTasks()` from a local SQLite file.
//! - Keep SQL details inside the store boundary.
//!
//! # Invariants
//! - Reads return rows in primary-key order, which is the store order the
//!   formatter preserves.
//! - An unknown status/priority label in a row decodes to `None` for that
//!   field only; the row itself is still returned.

use crate::db::{open_db, open_db_in_memory};
use crate::model::project::Project;
use crate::model::task::{Priority, Task, TaskStatus};
use crate::store::{EntityStore, StoreError, StoreResult, TaskFilter};
use async_trait::async_trait;
use log::debug;
use parking_lot::Mutex;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::Arc;

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    start_date,
    end_date
FROM projects";

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    status,
    priority,
    project_id,
    created_at,
    due_date
FROM tasks";

/// Entity store over one SQLite connection.
///
/// Reads run on tokio's blocking pool, so the async methods must be awaited
/// inside a tokio runtime.
pub struct SqliteEntityStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteEntityStore {
    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a migrated in-memory database.
    pub fn in_memory() -> StoreResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Inserts one project row. Seeding helper for tools and tests.
    pub fn insert_project(&self, project: &Project) -> StoreResult<()> {
        self.conn.lock().execute(
            "INSERT INTO projects (id, name, description, start_date, end_date)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                project.id,
                project.name.as_str(),
                project.description.as_deref(),
                project.start_date.as_deref(),
                project.end_date.as_deref(),
            ],
        )?;
        Ok(())
    }

    /// Inserts one task row. Seeding helper for tools and tests.
    pub fn insert_task(&self, task: &Task) -> StoreResult<()> {
        self.conn.lock().execute(
            "INSERT INTO tasks (
                id,
                title,
                description,
                status,
                priority,
                project_id,
                created_at,
                due_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                task.id,
                task.title.as_str(),
                task.description.as_deref(),
                task.status.map(TaskStatus::label),
                task.priority.map(Priority::label),
                task.project_id,
                task.created_at.as_deref(),
                task.due_date.as_deref(),
            ],
        )?;
        Ok(())
    }

    /// Runs a read on the blocking pool so SQLite I/O and the connection
    /// lock never stall async executor threads.
    async fn read<T, F>(&self, read: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock();
            read(&*guard)
        })
            .await
            .map_err(|err| StoreError::Unavailable(format!("sqlite read task failed: {err}")))?
    }
}

#[async_trait]
impl EntityStore for SqliteEntityStore {
    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let projects = self.read(query_projects).await?;
        debug!(
            "event=store_list module=store status=ok backend=sqlite collection=projects rows={}",
            projects.len()
        );
        Ok(projects)
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        let filter = *filter;
        let tasks = self.read(move |conn| query_tasks(conn, &filter)).await?;
        debug!(
            "event=store_list module=store status=ok backend=sqlite collection=tasks rows={}",
            tasks.len()
        );
        Ok(tasks)
    }
}

fn query_projects(conn: &Connection) -> StoreResult<Vec<Project>> {
    let mut stmt = conn.prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY id ASC;"))?;
    let mut rows = stmt.query([])?;
    let mut projects = Vec::new();
    while let Some(row) = rows.next()? {
        projects.push(parse_project_row(row)?);
    }
    Ok(projects)
}

fn query_tasks(conn: &Connection, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
    let mut stmt = conn.prepare(&format!(
        "{TASK_SELECT_SQL}
         WHERE (?1 IS NULL OR project_id = ?1)
         ORDER BY id ASC;"
    ))?;
    let mut rows = stmt.query(params![filter.project_id])?;
    let mut tasks = Vec::new();
    while let Some(row) = rows.next()? {
        tasks.push(parse_task_row(row)?);
    }
    Ok(tasks)
}

fn parse_project_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
    })
}

fn parse_task_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let status = row
        .get::<_, Option<String>>("status")?
        .as_deref()
        .and_then(TaskStatus::parse);
    let priority = row
        .get::<_, Option<String>>("priority")?
        .as_deref()
        .and_then(Priority::parse);

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        status,
        priority,
        project_id: row.get("project_id")?,
        created_at: row.get("created_at")?,
        due_date: row.get("due_date")?,
    })
}
