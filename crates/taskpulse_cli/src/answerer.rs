//! Answering backend that delegates to an external command.
//!
//! # Invariants
//! - The command receives the data context and the question on stdin.
//! - Only a zero exit status with non-blank stdout counts as an answer.
//! - stdin is written concurrently with reading stdout, and the whole
//!   exchange is bounded by a timeout; the child is killed when it expires.

use async_trait::async_trait;
use log::{debug, warn};
use std::io::ErrorKind;
use std::process::{Output, Stdio};
use std::time::Duration;
use taskpulse_core::{AnswerError, Answerer};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Default limit for one answer, from spawn to exit.
pub const DEFAULT_ANSWER_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs `program args...` once per fallback question.
pub struct ProcessAnswerer {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessAnswerer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: DEFAULT_ANSWER_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, prompt: String) -> Result<Output, AnswerError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| AnswerError::Unavailable(format!("{}: {err}", self.program)))?;

        // Feed stdin while stdout is drained so neither pipe can fill up.
        let stdin = child.stdin.take();
        let feed = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            match stdin.write_all(prompt.as_bytes()).await {
                Err(err) if err.kind() != ErrorKind::BrokenPipe => Err(err),
                _ => Ok(()),
            }
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        fed.map_err(|err| AnswerError::Unavailable(err.to_string()))?;
        output.map_err(|err| AnswerError::Unavailable(err.to_string()))
    }
}

#[async_trait]
impl Answerer for ProcessAnswerer {
    async fn answer(&self, context: &str, question: &str) -> Result<String, AnswerError> {
        let prompt = format!("{context}\nQuestion: {question}\n");
        let output = match tokio::time::timeout(self.timeout, self.run(prompt)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    "event=answer_process module=cli status=error error_code=timeout program={} timeout_ms={}",
                    self.program,
                    self.timeout.as_millis()
                );
                return Err(AnswerError::Unavailable(format!(
                    "{} timed out after {:?}",
                    self.program, self.timeout
                )));
            }
        };
        debug!(
            "event=answer_process module=cli status={} program={} stdout_bytes={}",
            if output.status.success() { "ok" } else { "error" },
            self.program,
            output.stdout.len()
        );
        if !output.status.success() {
            return Err(AnswerError::Unavailable(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Stand-in used when no answer command is configured.
pub struct NoAnswerer;

#[async_trait]
impl Answerer for NoAnswerer {
    async fn answer(&self, _context: &str, _question: &str) -> Result<String, AnswerError> {
        Err(AnswerError::Unavailable(
            "no answer command configured".to_string(),
        ))
    }
}

/// Either configured backend, chosen at startup.
pub enum CliAnswerer {
    Process(ProcessAnswerer),
    Disabled(NoAnswerer),
}

#[async_trait]
impl Answerer for CliAnswerer {
    async fn answer(&self, context: &str, question: &str) -> Result<String, AnswerError> {
        match self {
            Self::Process(inner) => inner.answer(context, question).await,
            Self::Disabled(inner) => inner.answer(context, question).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliAnswerer, NoAnswerer, ProcessAnswerer};
    use std::time::Duration;
    use taskpulse_core::{AnswerError, Answerer};

    #[tokio::test]
    async fn disabled_backend_is_unavailable() {
        let answerer = CliAnswerer::Disabled(NoAnswerer);
        let err = answerer.answer("ctx", "q").await.unwrap_err();
        assert!(matches!(err, AnswerError::Unavailable(_)));
    }

    #[tokio::test]
    async fn missing_program_is_unavailable() {
        let answerer = ProcessAnswerer::new("taskpulse-definitely-missing-binary", Vec::new());
        let err = answerer.answer("ctx", "q").await.unwrap_err();
        assert!(matches!(err, AnswerError::Unavailable(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn echoes_stdin_through_cat() {
        let answerer = ProcessAnswerer::new("cat", Vec::new());
        let answer = answerer.answer("ctx line", "why?").await.unwrap();
        assert_eq!(answer, "ctx line\nQuestion: why?");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn large_prompt_streams_through_a_chatty_program() {
        let context = "x".repeat(256 * 1024);
        let answerer = ProcessAnswerer::new("cat", Vec::new());

        let answer = tokio::time::timeout(Duration::from_secs(10), answerer.answer(&context, "q"))
            .await
            .expect("answer must not stall on full pipes")
            .unwrap();
        assert_eq!(answer.len(), context.len() + "\nQuestion: q".len());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn hung_program_times_out_as_unavailable() {
        let answerer = ProcessAnswerer::new("sleep", vec!["30".to_string()])
            .with_timeout(Duration::from_millis(200));

        let started = std::time::Instant::now();
        let err = answerer.answer("ctx", "q").await.unwrap_err();
        assert!(matches!(err, AnswerError::Unavailable(ref message) if message.contains("timed out")));
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
