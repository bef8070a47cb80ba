//! Read-only domain model supplied by the external data layer.
//!
//! # Responsibility
//! - Define project/task records exactly as the data layer hands them over.
//! - Provide an immutable snapshot shape consumed by every core computation.
//!
//! # Invariants
//! - Core never mutates a project or task; collaborators own persistence.
//! - Date fields keep the raw wire string; parsing happens per consumer so a
//!   malformed value only affects the metric that needs it.

pub mod project;
pub mod snapshot;
pub mod task;
pub mod time;
