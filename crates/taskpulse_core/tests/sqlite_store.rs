use rusqlite::Connection;
use taskpulse_core::db::migrations::{latest_version, schema_version};
use taskpulse_core::db::{open_db, open_db_in_memory, DbError};
use taskpulse_core::{
    fetch_snapshot, EntityStore, Priority, Project, SqliteEntityStore, StoreError, Task,
    TaskFilter, TaskStatus,
};

fn seeded_store() -> SqliteEntityStore {
    let store = SqliteEntityStore::in_memory().unwrap();
    let mut apollo = Project::new(2, "Apollo Launch");
    apollo.description = Some("Moon shot".to_string());
    apollo.start_date = Some("2024-01-01".to_string());
    store.insert_project(&apollo).unwrap();
    store.insert_project(&Project::new(1, "Gemini")).unwrap();

    let mut fuel = Task::new(10, "Fuel check");
    fuel.project_id = Some(2);
    fuel.status = Some(TaskStatus::UnderReview);
    fuel.priority = Some(Priority::Urgent);
    fuel.created_at = Some("2024-06-01T08:00:00Z".to_string());
    store.insert_task(&fuel).unwrap();

    let mut suits = Task::new(11, "Suit fitting");
    suits.project_id = Some(1);
    store.insert_task(&suits).unwrap();

    let mut orphan = Task::new(12, "Orphan");
    orphan.project_id = Some(99);
    store.insert_task(&orphan).unwrap();
    store
}

#[tokio::test]
async fn lists_rows_in_key_order_with_decoded_enums() {
    let store = seeded_store();

    let projects = store.list_projects().await.unwrap();
    let ids: Vec<_> = projects.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(projects[1].description.as_deref(), Some("Moon shot"));

    let tasks = store.list_tasks(&TaskFilter::default()).await.unwrap();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].status, Some(TaskStatus::UnderReview));
    assert_eq!(tasks[0].priority, Some(Priority::Urgent));
    assert_eq!(tasks[2].project_id, Some(99));
}

#[tokio::test]
async fn project_filter_limits_tasks() {
    let store = seeded_store();

    let tasks = store.list_tasks(&TaskFilter::for_project(2)).await.unwrap();
    let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Fuel check"]);
}

#[tokio::test]
async fn unknown_labels_decode_to_none() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO tasks (id, title, status, priority) VALUES (1, 'Odd', 'Blocked', 'Critical');",
        [],
    )
    .unwrap();
    let store = SqliteEntityStore::from_connection(conn);

    let tasks = store.list_tasks(&TaskFilter::default()).await.unwrap();
    assert_eq!(tasks[0].status, None);
    assert_eq!(tasks[0].priority, None);
}

#[tokio::test]
async fn snapshot_from_sqlite_matches_rows() {
    let store = seeded_store();
    let snapshot = fetch_snapshot(&store).await;
    assert_eq!(snapshot.projects().len(), 2);
    assert_eq!(snapshot.tasks().len(), 3);
    assert_eq!(snapshot.project_label(&snapshot.tasks()[2]), "99");
}

#[test]
fn duplicate_project_key_is_reported() {
    let store = seeded_store();
    let err = store.insert_project(&Project::new(1, "Again")).unwrap_err();
    assert!(matches!(err, StoreError::Db(DbError::Sqlite(_))));
}

#[test]
fn open_db_applies_migrations_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskpulse.db");

    let first = open_db(&path).unwrap();
    assert_eq!(schema_version(&first).unwrap(), latest_version());
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second).unwrap(), latest_version());
    assert_table_exists(&second, "projects");
    assert_table_exists(&second, "tasks");
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match SqliteEntityStore::open(&path) {
        Err(StoreError::Db(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        })) => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("future schema must be rejected"),
    }
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

#[tokio::test(flavor = "current_thread")]
async fn concurrent_reads_share_one_connection() {
    let store = seeded_store();

    let all_filter = TaskFilter::default();
    let project_filter = TaskFilter::for_project(1);
    let (projects, tasks, scoped) = tokio::join!(
        store.list_projects(),
        store.list_tasks(&all_filter),
        store.list_tasks(&project_filter),
    );
    assert_eq!(projects.unwrap().len(), 2);
    assert_eq!(tasks.unwrap().len(), 3);
    let scoped = scoped.unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].title, "Suit fitting");
}
