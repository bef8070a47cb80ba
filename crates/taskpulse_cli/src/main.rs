//! TaskPulse command-line front end.
//!
//! # Responsibility
//! - Wire a snapshot source, config, logging and an answering backend into
//!   `taskpulse_core`.
//! - Print chat replies as text and analytics as JSON.
//!
//! # Invariants
//! - Logs go to stderr (or `--log-dir`), never to stdout.
//! - A missing answer command degrades to the apology reply, not an exit error.

mod answerer;
mod source;

use answerer::{CliAnswerer, NoAnswerer, ProcessAnswerer};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;
use source::SourceStore;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use taskpulse_core::{
    build_context, fetch_snapshot, filter_tasks, init_logging, init_logging_to, summarize,
    ChatAssistant, CoreConfig, LogTarget, Priority, SortDirection, TaskQuery, TaskSort,
};

/// Free-text project/task assistant and dashboard analytics.
#[derive(Parser)]
#[command(name = "taskpulse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// SQLite database holding `projects` and `tasks`
    #[arg(long, env = "TASKPULSE_DB", conflicts_with = "json")]
    db: Option<PathBuf>,

    /// JSON export with `projects` and `tasks` arrays
    #[arg(long, env = "TASKPULSE_JSON")]
    json: Option<PathBuf>,

    /// TOML config file
    #[arg(long, env = "TASKPULSE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TASKPULSE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (stderr when absent)
    #[arg(long, env = "TASKPULSE_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer one chat message
    Ask {
        /// Message text; words are joined with spaces
        #[arg(required = true)]
        message: Vec<String>,

        /// Program answering free-form questions (context + question on stdin)
        #[arg(long, env = "TASKPULSE_ANSWER_CMD")]
        answer_cmd: Option<String>,

        /// Extra argument for the answer program (repeatable)
        #[arg(long = "answer-arg")]
        answer_args: Vec<String>,

        /// Seconds to wait for the answer program before apologizing
        #[arg(long, default_value_t = 60)]
        answer_timeout_secs: u64,
    },

    /// Print the dashboard trend series as JSON
    Trends,

    /// Print the priority dashboard summary as JSON
    Summary {
        /// Only tasks of this project id
        #[arg(long)]
        project: Option<i64>,

        #[arg(long, value_enum)]
        priority: Option<PriorityArg>,

        /// First creation day included (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,

        /// Last creation day included (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,

        #[arg(long, value_enum, default_value = "priority")]
        sort: SortArg,

        #[arg(long, value_enum, default_value = "desc")]
        direction: DirectionArg,
    },

    /// Print the fallback data context
    Context,
}

#[derive(Clone, Copy, ValueEnum)]
enum PriorityArg {
    Urgent,
    High,
    Medium,
    Low,
    Backlog,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Urgent => Self::Urgent,
            PriorityArg::High => Self::High,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::Low => Self::Low,
            PriorityArg::Backlog => Self::Backlog,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Priority,
    Project,
    Title,
}

impl From<SortArg> for TaskSort {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Priority => Self::Priority,
            SortArg::Project => Self::Project,
            SortArg::Title => Self::Title,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Asc,
    Desc,
}

impl From<DirectionArg> for SortDirection {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::Asc => Self::Asc,
            DirectionArg::Desc => Self::Desc,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("taskpulse: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    start_logging(&cli)?;

    let config = match &cli.config {
        Some(path) => CoreConfig::load(path).map_err(|err| err.to_string())?,
        None => CoreConfig::default(),
    };
    let store = open_source(&cli)?;

    match cli.command {
        Commands::Ask {
            message,
            answer_cmd,
            answer_args,
            answer_timeout_secs,
        } => {
            let answerer = match answer_cmd {
                Some(program) => CliAnswerer::Process(
                    ProcessAnswerer::new(program, answer_args)
                        .with_timeout(Duration::from_secs(answer_timeout_secs)),
                ),
                None => CliAnswerer::Disabled(NoAnswerer),
            };
            let assistant = ChatAssistant::with_config(store, answerer, config);
            let reply = assistant.classify_and_respond(&message.join(" ")).await;
            println!("{}", reply.text);
        }
        Commands::Trends => {
            let assistant = ChatAssistant::with_config(store, NoAnswerer, config);
            print_json(&assistant.trends().await)?;
        }
        Commands::Summary {
            project,
            priority,
            from,
            to,
            sort,
            direction,
        } => {
            let snapshot = fetch_snapshot(&store).await;
            let query = TaskQuery {
                project_id: project,
                priority: priority.map(Priority::from),
                created_between: from.zip(to),
                offset: Some(config.trends.offset()),
                sort: sort.into(),
                direction: direction.into(),
            };
            let selected = filter_tasks(&snapshot, &query);
            print_json(&summarize(&snapshot, &selected))?;
        }
        Commands::Context => {
            let snapshot = fetch_snapshot(&store).await;
            let today = Utc::now()
                .with_timezone(&config.trends.offset())
                .date_naive();
            print!("{}", build_context(&snapshot, today, &config.fallback));
        }
    }
    Ok(())
}

fn start_logging(cli: &Cli) -> Result<(), String> {
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| taskpulse_core::default_log_level().to_string());
    match &cli.log_dir {
        Some(dir) => init_logging(&level, dir),
        None => init_logging_to(&level, LogTarget::Stderr),
    }?;
    info!(
        "event=cli_start module=cli status=ok version={}",
        taskpulse_core::core_version()
    );
    Ok(())
}

fn open_source(cli: &Cli) -> Result<SourceStore, String> {
    let store = match (&cli.db, &cli.json) {
        (Some(path), _) => SourceStore::open_sqlite(path),
        (None, Some(path)) => SourceStore::load_json(path),
        (None, None) => Ok(SourceStore::empty()),
    };
    store.map_err(|err| err.to_string())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|err| err.to_string())?;
    println!("{text}");
    Ok(())
}
