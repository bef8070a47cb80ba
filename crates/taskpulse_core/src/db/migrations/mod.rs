//! Schema migrations for the reference store.
//!
//! # Invariants
//! - Versions are strictly increasing and never reused.
//! - Every applied step bumps `PRAGMA user_version` inside the same
//!   transaction, so a failed step leaves the previous version intact.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "projects_tasks",
        sql: include_str!("0001_projects_tasks.sql"),
    },
    SchemaStep {
        version: 2,
        name: "task_created_index",
        sql: include_str!("0002_task_created_index.sql"),
    },
];

/// Highest schema version this build can open.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.iter().map(|step| step.version).max().unwrap_or(0)
}

/// Reads the schema version recorded in the database.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Brings the schema up to `latest_version()`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = schema_version(conn)?;
    let to = latest_version();
    if from > to {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: to,
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > from)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={from} to_version={to} steps={}",
        pending
            .iter()
            .map(|step| step.name)
            .collect::<Vec<_>>()
            .join(",")
    );
    Ok(())
}
