//! Core logging bootstrap.
//!
//! # Responsibility
//! - Start the `flexi_logger` backend for the `log` facade once per process.
//! - Capture panics as single-line log events.
//!
//! # Invariants
//! - Initialization is idempotent for an identical target and level.
//! - Switching level or target after initialization is rejected.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::path::PathBuf;

const LOG_FILE_BASENAME: &str = "taskpulse";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

/// Where log records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Size-rotated files under an absolute directory.
    Directory(PathBuf),
    /// Standard error, for command-line use.
    Stderr,
}

impl LogTarget {
    /// Builds a directory target from user input (flag, env var).
    pub fn directory(raw: &str) -> Result<Self, String> {
        let target = Self::Directory(PathBuf::from(raw.trim()));
        target.validate()?;
        Ok(target)
    }

    fn validate(&self) -> Result<(), String> {
        let Self::Directory(dir) = self else {
            return Ok(());
        };
        if dir.as_os_str().is_empty() {
            return Err("log directory cannot be empty".to_string());
        }
        if !dir.is_absolute() {
            return Err(format!(
                "log directory must be absolute, got `{}`",
                dir.display()
            ));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        match self {
            Self::Directory(dir) => dir.display().to_string(),
            Self::Stderr => "stderr".to_string(),
        }
    }
}

struct LoggingState {
    level: LevelFilter,
    target: LogTarget,
    _logger: LoggerHandle,
}

/// Starts rolling file logs under `log_dir`.
///
/// # Errors
/// - Unsupported `level`.
/// - `log_dir` empty, relative, or not creatable.
/// - Logger already running with another level or target.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    init_logging_to(level, LogTarget::directory(log_dir)?)
}

/// Starts logging to an explicit target.
pub fn init_logging_to(level: &str, target: LogTarget) -> Result<(), String> {
    let level = parse_level(level)?;
    target.validate()?;

    if let Some(state) = LOGGING_STATE.get() {
        return check_same_config(state, level, &target);
    }

    let state = LOGGING_STATE.get_or_try_init(|| start_logger(level, target.clone()))?;
    check_same_config(state, level, &target)
}

/// Returns `(level, target)` when logging is active.
pub fn logging_status() -> Option<(&'static str, LogTarget)> {
    LOGGING_STATE
        .get()
        .map(|state| (level_name(state.level), state.target.clone()))
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(level: LevelFilter, target: LogTarget) -> Result<LoggingState, String> {
    let logger = Logger::try_with_str(level_name(level))
        .map_err(|err| format!("invalid log level `{}`: {err}", level_name(level)))?;

    let logger = match &target {
        LogTarget::Directory(dir) => {
            std::fs::create_dir_all(dir).map_err(|err| {
                format!("failed to create log directory `{}`: {err}", dir.display())
            })?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir.as_path())
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
        LogTarget::Stderr => logger
            .log_to_stderr()
            .format_for_stderr(flexi_logger::default_format),
    }
    .start()
    .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook_once();
    info!(
        "event=core_init module=core status=ok level={} target={} version={}",
        level_name(level),
        target.describe(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(LoggingState {
        level,
        target,
        _logger: logger,
    })
}

fn check_same_config(
    state: &LoggingState,
    level: LevelFilter,
    target: &LogTarget,
) -> Result<(), String> {
    if &state.target != target {
        return Err(format!(
            "logging already writes to `{}`; refusing to switch to `{}`",
            state.target.describe(),
            target.describe()
        ));
    }
    if state.level != level {
        return Err(format!(
            "logging already runs at `{}`; refusing to switch to `{}`",
            level_name(state.level),
            level_name(level)
        ));
    }
    Ok(())
}

/// Accepts `log` level names case-insensitively, plus `warning`; rejects `off`.
fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    let trimmed = raw.trim();
    let candidate = if trimmed.eq_ignore_ascii_case("warning") {
        "warn"
    } else {
        trimmed
    };
    match candidate.parse::<LevelFilter>() {
        Ok(LevelFilter::Off) | Err(_) => Err(format!(
            "unsupported log level `{trimmed}`; expected trace|debug|info|warn|error"
        )),
        Ok(level) => Ok(level),
    }
}

fn level_name(level: LevelFilter) -> &'static str {
    match level {
        LevelFilter::Off => "off",
        LevelFilter::Error => "error",
        LevelFilter::Warn => "warn",
        LevelFilter::Info => "info",
        LevelFilter::Debug => "debug",
        LevelFilter::Trace => "trace",
    }
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.set(()).is_err() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info.location().map_or_else(
            || "unknown".to_string(),
            |loc| format!("{}:{}", loc.file(), loc.line()),
        );
        // Payloads may echo user questions.
        error!(
            "event=panic_captured module=core status=error location={location} payload={}",
            sanitize_message(panic_payload(panic_info.payload()), MAX_PANIC_PAYLOAD_CHARS)
        );
        previous_hook(panic_info);
    }));
}

fn panic_payload(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Folds a value onto one line and caps it at `max_chars` (plus `...`).
pub fn sanitize_message(value: &str, max_chars: usize) -> String {
    let mut line: String = value
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .take(max_chars)
        .collect();
    if value.chars().nth(max_chars).is_some() {
        line.push_str("...");
    }
    line
}
