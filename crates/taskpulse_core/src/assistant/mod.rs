//! Chat assistant orchestration.
//!
//! # Responsibility
//! - Route a message through classification, resolution and formatting.
//! - Hand unmatched messages to an external answerer with a bounded context.
//! - Convert collaborator failures into a fixed apology.
//!
//! # Invariants
//! - Each call works on its own freshly fetched snapshot.
//! - Upstream failures are logged and never propagated to the caller.

pub mod answerer;
pub mod context;
pub mod service;
