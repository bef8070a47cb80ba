//! Query interpretation and analytics core for the TaskPulse assistant.
//! This crate owns intent classification, fuzzy project resolution, reply
//! formatting, fallback context building and trend aggregation.

pub mod analytics;
pub mod assistant;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod store;

pub use analytics::summary::{
    filter_tasks, summarize, DashboardSummary, SortDirection, TaskQuery, TaskSort,
};
pub use analytics::trends::{
    compute_trends, compute_trends_with, CompletionPoint, CreationPoint, PriorityPoint, Trends,
};
pub use assistant::answerer::{AnswerError, Answerer};
pub use assistant::context::build_context;
pub use assistant::service::{ChatAssistant, ChatReply, EMPTY_INPUT_REPLY};
pub use config::{ConfigError, CoreConfig, FallbackConfig, TrendConfig, APOLOGY_REPLY};
pub use logging::{default_log_level, init_logging, init_logging_to, logging_status, LogTarget};
pub use model::project::{Project, ProjectId};
pub use model::snapshot::Snapshot;
pub use model::task::{Priority, Task, TaskId, TaskStatus};
pub use query::format::respond;
pub use query::intent::{classify, classify_in, Intent, IntentKind};
pub use query::resolver::{match_projects, resolve_projects, Resolution};
pub use store::memory::InMemoryStore;
pub use store::sqlite::SqliteEntityStore;
pub use store::{fetch_snapshot, EntityStore, StoreError, StoreResult, TaskFilter};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
