//! Free-text query interpretation for the chat assistant.
//!
//! # Responsibility
//! - Classify user text into a closed set of intents.
//! - Resolve fuzzy project references.
//! - Render intent results as markdown-safe text.
//!
//! # Invariants
//! - Everything here is a pure function of `(input, snapshot)`.
//! - `NotFound`/`Ambiguous` are ordinary outcomes, never errors.

pub mod format;
pub mod intent;
pub mod resolver;
