//! Day-bucketed trend series.
//!
//! # Responsibility
//! - Derive creation, completion and priority series from task creation dates.
//! - Share one windowing + bucketing routine across all three metrics.
//!
//! # Invariants
//! - Every series is chronological with exactly one entry per calendar day
//!   in its window (zero-filled when no task falls on that day).
//! - Creation and priority windows span at least `min_window_days`, widened
//!   backward from the latest observed day (or today when nothing is dated).
//! - The completion window spans exactly the observed days and is empty when
//!   no task carries a usable creation date.
//! - Completion rates stay within `0..=100` and are `0` for empty days.

use crate::config::TrendConfig;
use crate::model::task::{Priority, Task};
use crate::model::time::parse_optional;
use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// Tasks created on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreationPoint {
    pub date: NaiveDate,
    pub count: usize,
}

/// Completed share of tasks created on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionPoint {
    pub date: NaiveDate,
    pub completed: usize,
    pub total: usize,
    /// Percentage in `0..=100`, rounded to `TrendConfig::rate_decimals`.
    pub rate: f64,
}

/// Priority mix of tasks created on one calendar day.
///
/// Tasks without a priority, or with `Backlog`, are not counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriorityPoint {
    pub date: NaiveDate,
    #[serde(rename = "Urgent")]
    pub urgent: usize,
    #[serde(rename = "High")]
    pub high: usize,
    #[serde(rename = "Medium")]
    pub medium: usize,
    #[serde(rename = "Low")]
    pub low: usize,
}

impl PriorityPoint {
    pub fn total(&self) -> usize {
        self.urgent + self.high + self.medium + self.low
    }
}

/// The three dashboard series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trends {
    pub creation: Vec<CreationPoint>,
    pub completion: Vec<CompletionPoint>,
    pub priority: Vec<PriorityPoint>,
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DayWindow {
    /// Number of days in the window.
    pub fn len(&self) -> usize {
        usize::try_from((self.last - self.first).num_days() + 1).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates days from `first` to `last`, inclusive.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last;
        self.first.iter_days().take_while(move |day| *day <= last)
    }
}

/// How a metric's window is derived from the observed creation days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPolicy {
    /// Observed span, widened backward to at least this many days.
    AtLeast(u32),
    /// Observed span only; no window when nothing is dated.
    Observed,
}

/// Tasks grouped by the local calendar day of their creation instant.
#[derive(Debug, Default)]
pub struct DayBuckets<'a> {
    by_day: BTreeMap<NaiveDate, Vec<&'a Task>>,
    dated: usize,
    malformed: usize,
}

impl<'a> DayBuckets<'a> {
    /// Groups tasks by creation day in `offset` local time.
    ///
    /// Tasks without a creation date are ignored; malformed dates are counted
    /// and skipped.
    pub fn collect(tasks: &'a [Task], offset: FixedOffset) -> Self {
        let mut buckets = Self::default();
        for task in tasks {
            match parse_optional(task.created_at.as_deref()) {
                Some(Ok(instant)) => {
                    let day = instant.with_timezone(&offset).date_naive();
                    buckets.by_day.entry(day).or_default().push(task);
                    buckets.dated += 1;
                }
                Some(Err(_)) => buckets.malformed += 1,
                None => {}
            }
        }
        buckets
    }

    /// Number of tasks with a usable creation date.
    pub fn dated(&self) -> usize {
        self.dated
    }

    /// Number of tasks skipped because their creation date did not parse.
    pub fn malformed(&self) -> usize {
        self.malformed
    }

    /// Derives the window for `policy`, anchoring empty data at `today`.
    pub fn window(&self, policy: WindowPolicy, today: NaiveDate) -> Option<DayWindow> {
        let observed = self
            .by_day
            .keys()
            .next()
            .zip(self.by_day.keys().next_back())
            .map(|(first, last)| DayWindow {
                first: *first,
                last: *last,
            });

        match policy {
            WindowPolicy::Observed => observed,
            WindowPolicy::AtLeast(min_days) => {
                let span = u64::from(min_days.max(1) - 1);
                let window = observed.unwrap_or(DayWindow {
                    first: today,
                    last: today,
                });
                let earliest_allowed = window
                    .last
                    .checked_sub_days(Days::new(span))
                    .unwrap_or(NaiveDate::MIN);
                Some(DayWindow {
                    first: window.first.min(earliest_allowed),
                    last: window.last,
                })
            }
        }
    }

    /// Applies `reduce` to every day of `window`, in order, gap days included.
    pub fn reduce<T>(
        &self,
        window: DayWindow,
        mut reduce: impl FnMut(NaiveDate, &[&'a Task]) -> T,
    ) -> Vec<T> {
        window
            .days()
            .map(|day| {
                let tasks = self.by_day.get(&day).map_or(&[][..], Vec::as_slice);
                reduce(day, tasks)
            })
            .collect()
    }
}

/// Computes all three series using the current time and default config.
pub fn compute_trends(tasks: &[Task]) -> Trends {
    compute_trends_with(tasks, Utc::now(), &TrendConfig::default())
}

/// Computes all three series for a fixed "now".
pub fn compute_trends_with(tasks: &[Task], now: DateTime<Utc>, config: &TrendConfig) -> Trends {
    let offset = config.offset();
    let today = now.with_timezone(&offset).date_naive();
    let buckets = DayBuckets::collect(tasks, offset);
    let min_window = WindowPolicy::AtLeast(config.min_window_days);

    let creation = buckets
        .window(min_window, today)
        .map(|window| buckets.reduce(window, creation_point))
        .unwrap_or_default();
    let priority = buckets
        .window(min_window, today)
        .map(|window| buckets.reduce(window, priority_point))
        .unwrap_or_default();
    let completion = buckets
        .window(WindowPolicy::Observed, today)
        .map(|window| {
            buckets.reduce(window, |day, day_tasks| {
                completion_point(day, day_tasks, config.rate_decimals)
            })
        })
        .unwrap_or_default();

    debug!(
        "event=trend_compute module=analytics status=ok tasks={} dated={} skipped_malformed={} creation_days={} completion_days={}",
        tasks.len(),
        buckets.dated(),
        buckets.malformed(),
        creation.len(),
        completion.len()
    );

    Trends {
        creation,
        completion,
        priority,
    }
}

fn creation_point(date: NaiveDate, tasks: &[&Task]) -> CreationPoint {
    CreationPoint {
        date,
        count: tasks.len(),
    }
}

fn priority_point(date: NaiveDate, tasks: &[&Task]) -> PriorityPoint {
    let mut point = PriorityPoint {
        date,
        ..PriorityPoint::default()
    };
    for task in tasks {
        match task.priority {
            Some(Priority::Urgent) => point.urgent += 1,
            Some(Priority::High) => point.high += 1,
            Some(Priority::Medium) => point.medium += 1,
            Some(Priority::Low) => point.low += 1,
            Some(Priority::Backlog) | None => {}
        }
    }
    point
}

fn completion_point(date: NaiveDate, tasks: &[&Task], decimals: u32) -> CompletionPoint {
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.is_completed()).count();
    CompletionPoint {
        date,
        completed,
        total,
        rate: completion_rate(completed, total, decimals),
    }
}

/// `completed / total * 100`, rounded; `0` when `total` is zero.
pub fn completion_rate(completed: usize, total: usize, decimals: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = completed as f64 / total as f64 * 100.0;
    let scale = 10f64.powi(i32::try_from(decimals.min(6)).unwrap_or(6));
    ((raw * scale).round() / scale).clamp(0.0, 100.0)
}
