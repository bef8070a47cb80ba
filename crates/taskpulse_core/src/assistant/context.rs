//! Fallback context block for the external answerer.
//!
//! # Invariants
//! - Summary counts always describe the whole snapshot, even when project
//!   paragraphs are cut to respect `max_context_chars`.
//! - Paragraphs are dropped whole, from the end, never mid-line.
//! - The omission trailer counts only dropped project paragraphs; dropped
//!   unassigned tasks are named separately. A paragraph is only kept if the
//!   trailer still fits inside the bound after it.

use crate::config::FallbackConfig;
use crate::model::project::Project;
use crate::model::snapshot::Snapshot;
use crate::model::task::Task;
use crate::model::time::calendar_date;
use chrono::NaiveDate;
use std::fmt::Write;

/// Builds the data context handed to the answerer alongside the question.
pub fn build_context(snapshot: &Snapshot, today: NaiveDate, config: &FallbackConfig) -> String {
    let projects = snapshot.projects();
    let active = projects.iter().filter(|project| project.is_active()).count();

    let mut block = String::new();
    let _ = writeln!(block, "Project management data as of {}:", today.format("%Y-%m-%d"));
    block.push('\n');
    block.push_str("Summary:\n");
    let _ = writeln!(block, "- Total Projects: {}", projects.len());
    let _ = writeln!(block, "- Total Tasks: {}", snapshot.tasks().len());
    let _ = writeln!(block, "- Active Projects: {active}");
    let _ = writeln!(block, "- Completed Projects: {}", projects.len() - active);
    block.push('\n');
    block.push_str("Project Details:\n");

    let project_paragraphs: Vec<String> = projects
        .iter()
        .map(|project| project_paragraph(project, snapshot))
        .collect();
    let orphans: Vec<&Task> = snapshot
        .tasks()
        .iter()
        .filter(|task| task.project_id.and_then(|id| snapshot.project(id)).is_none())
        .collect();
    let orphan_paragraph = (!orphans.is_empty())
        .then(|| task_paragraph("Tasks without a known project", &orphans));

    let paragraphs: Vec<&str> = project_paragraphs
        .iter()
        .map(String::as_str)
        .chain(orphan_paragraph.as_deref())
        .collect();
    let project_count = project_paragraphs.len();

    let mut used = block.chars().count();
    let mut written = 0;
    for (index, paragraph) in paragraphs.iter().enumerate() {
        let size = paragraph.chars().count() + 1;
        let reserve = omission_line(project_count, paragraphs.len(), index + 1)
            .map_or(0, |line| line.chars().count());
        if used + size + reserve > config.max_context_chars {
            break;
        }
        block.push('\n');
        block.push_str(paragraph);
        used += size;
        written += 1;
    }
    if let Some(line) = omission_line(project_count, paragraphs.len(), written) {
        block.push_str(&line);
    }
    block
}

/// Trailer naming what was left out once `written` paragraphs are kept.
///
/// Project paragraphs come first; any paragraph past `project_count` is the
/// unassigned-task block.
fn omission_line(project_count: usize, total: usize, written: usize) -> Option<String> {
    if written >= total {
        return None;
    }
    let dropped_projects = project_count.saturating_sub(written);
    let dropped_orphans = total > project_count;
    let what = match (dropped_projects, dropped_orphans) {
        (0, _) => "unassigned tasks omitted".to_string(),
        (count, true) => format!("{count} more projects and unassigned tasks omitted"),
        (count, false) => format!("{count} more projects omitted"),
    };
    Some(format!("\n... ({what})\n"))
}

fn project_paragraph(project: &Project, snapshot: &Snapshot) -> String {
    let tasks: Vec<&Task> = snapshot.tasks_for_project(project.id).collect();
    let mut paragraph = String::new();
    let _ = writeln!(paragraph, "Project: {}", project.name);
    let _ = writeln!(
        paragraph,
        "   Description: {}",
        project
            .description
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or("N/A")
    );
    let _ = writeln!(
        paragraph,
        "   Status: {}",
        if project.is_active() { "Active" } else { "Completed" }
    );
    let _ = writeln!(
        paragraph,
        "   Timeline: {} to {}",
        date_or_not_set(project.start_date.as_deref()),
        date_or_not_set(project.end_date.as_deref())
    );
    paragraph.push_str(&task_lines(&tasks));
    paragraph
}

fn task_paragraph(heading: &str, tasks: &[&Task]) -> String {
    format!("{heading}:\n{}", task_lines(tasks))
}

fn task_lines(tasks: &[&Task]) -> String {
    let mut lines = String::new();
    let _ = writeln!(lines, "   Tasks ({}):", tasks.len());
    for task in tasks {
        let _ = writeln!(
            lines,
            "   • [{}] {} - Priority: {}, Due: {}",
            task.status_label(),
            task.title,
            task.priority_label(),
            date_or_not_set(task.due_date.as_deref())
        );
    }
    lines
}

fn date_or_not_set(raw: Option<&str>) -> String {
    calendar_date(raw).unwrap_or_else(|| "Not set".to_string())
}
