//! Dashboard analytics over a task collection.
//!
//! # Responsibility
//! - Compute per-day trend series with gap filling.
//! - Compute priority/project breakdowns for the priority dashboard.
//!
//! # Invariants
//! - Inputs are never mutated; every call recomputes from the given slice.
//! - A task missing data for one metric is excluded from that metric only.

pub mod summary;
pub mod trends;
