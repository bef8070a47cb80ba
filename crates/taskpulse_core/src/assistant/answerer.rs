//! External answering collaborator contract.

use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure reported by an answering backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerError {
    /// Backend could not be reached or rejected the request.
    Unavailable(String),
    /// Backend replied with nothing usable.
    EmptyAnswer,
}

impl Display for AnswerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "answerer unavailable: {message}"),
            Self::EmptyAnswer => write!(f, "answerer returned an empty reply"),
        }
    }
}

impl Error for AnswerError {}

/// Answers a free-form question given a plain-text data context.
///
/// The reply is treated as opaque text.
#[async_trait]
pub trait Answerer: Send + Sync {
    async fn answer(&self, context: &str, question: &str) -> Result<String, AnswerError>;
}
