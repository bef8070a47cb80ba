//! `classify_and_respond` entry point.

use crate::analytics::trends::{compute_trends_with, Trends};
use crate::assistant::answerer::{AnswerError, Answerer};
use crate::assistant::context::build_context;
use crate::config::{CoreConfig, APOLOGY_REPLY};
use crate::query::format::respond;
use crate::query::intent::{classify_in, Intent, IntentKind};
use crate::store::{fetch_snapshot, EntityStore};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use std::time::Instant;

/// Reply shown for blank input.
pub const EMPTY_INPUT_REPLY: &str = "Please type a question about your projects or tasks.";

/// Text reply for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub text: String,
    /// `None` when the input was blank and never classified.
    pub intent: Option<IntentKind>,
}

/// Chat assistant over one store and one answering backend.
pub struct ChatAssistant<S: EntityStore, A: Answerer> {
    store: S,
    answerer: A,
    config: CoreConfig,
}

impl<S: EntityStore, A: Answerer> ChatAssistant<S, A> {
    pub fn new(store: S, answerer: A) -> Self {
        Self::with_config(store, answerer, CoreConfig::default())
    }

    pub fn with_config(store: S, answerer: A, config: CoreConfig) -> Self {
        Self {
            store,
            answerer,
            config,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn answerer(&self) -> &A {
        &self.answerer
    }

    /// Answers one chat message.
    pub async fn classify_and_respond(&self, raw: &str) -> ChatReply {
        self.classify_and_respond_at(raw, Utc::now()).await
    }

    /// Answers one chat message with a fixed "now" (used for context dates).
    pub async fn classify_and_respond_at(&self, raw: &str, now: DateTime<Utc>) -> ChatReply {
        if raw.trim().is_empty() {
            return ChatReply {
                text: EMPTY_INPUT_REPLY.to_string(),
                intent: None,
            };
        }

        let started_at = Instant::now();
        let snapshot = fetch_snapshot(&self.store).await;
        let intent = classify_in(raw, snapshot.projects());

        let text = match respond(&intent, &snapshot) {
            Some(text) => text,
            None => {
                let question = match &intent {
                    Intent::FreeForm(text) => text.as_str(),
                    _ => raw.trim(),
                };
                let today = now.with_timezone(&self.config.trends.offset()).date_naive();
                let context = build_context(&snapshot, today, &self.config.fallback);
                match self.ask_answerer(&context, question).await {
                    Ok(answer) => answer,
                    Err(err) => {
                        warn!(
                            "event=chat_fallback module=assistant status=error error_code=upstream_failure error={err}"
                        );
                        APOLOGY_REPLY.to_string()
                    }
                }
            }
        };

        info!(
            "event=chat_reply module=assistant status=ok intent={} projects={} tasks={} duration_ms={}",
            intent.kind().as_str(),
            snapshot.projects().len(),
            snapshot.tasks().len(),
            started_at.elapsed().as_millis()
        );

        ChatReply {
            text,
            intent: Some(intent.kind()),
        }
    }

    /// Fetches a snapshot and computes the dashboard trend series.
    pub async fn trends(&self) -> Trends {
        self.trends_at(Utc::now()).await
    }

    pub async fn trends_at(&self, now: DateTime<Utc>) -> Trends {
        let snapshot = fetch_snapshot(&self.store).await;
        compute_trends_with(snapshot.tasks(), now, &self.config.trends)
    }

    async fn ask_answerer(&self, context: &str, question: &str) -> Result<String, AnswerError> {
        let answer = self.answerer.answer(context, question).await?;
        if answer.trim().is_empty() {
            return Err(AnswerError::EmptyAnswer);
        }
        Ok(answer)
    }
}
