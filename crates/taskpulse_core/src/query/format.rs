//! Response rendering for classified intents.
//!
//! # Invariants
//! - Output depends only on `(intent, snapshot)`; bullets follow store order.
//! - Entity names and titles are markdown-escaped so a lightweight renderer
//!   shows them literally; template markup (bullets, bold) is ours.

use crate::model::project::Project;
use crate::model::snapshot::Snapshot;
use crate::query::intent::Intent;
use crate::query::resolver::{resolve_projects, Resolution};

/// Renders a deterministic reply, or `None` for `FreeForm`.
pub fn respond(intent: &Intent, snapshot: &Snapshot) -> Option<String> {
    match intent {
        Intent::ListProjects => Some(format_project_list(snapshot)),
        Intent::ListAllTasks => Some(format_all_tasks(snapshot)),
        Intent::TasksForProject(fragment) => Some(format_tasks_for_project(fragment, snapshot)),
        Intent::FreeForm(_) => None,
    }
}

pub fn format_project_list(snapshot: &Snapshot) -> String {
    let projects = snapshot.projects();
    let mut lines = vec![format!("There are {} projects.", projects.len())];
    lines.extend(
        projects
            .iter()
            .map(|project| format!("• {} (ID: {})", escape_markdown(&project.name), project.id)),
    );
    lines.join("\n")
}

pub fn format_all_tasks(snapshot: &Snapshot) -> String {
    let tasks = snapshot.tasks();
    let mut lines = vec![format!("There are {} tasks across all projects.", tasks.len())];
    lines.extend(tasks.iter().map(|task| {
        format!(
            "• {} [{}] (Project: {})",
            escape_markdown(&task.title),
            task.status_label(),
            escape_markdown(&snapshot.project_label(task))
        )
    }));
    lines.join("\n")
}

/// Resolves `fragment` and renders the matching reply variant.
pub fn format_tasks_for_project(fragment: &str, snapshot: &Snapshot) -> String {
    match resolve_projects(fragment, snapshot.projects()) {
        Resolution::Unique(project) => format_project_tasks(project, snapshot),
        Resolution::Ambiguous(candidates) => format_ambiguous(&candidates),
        Resolution::NotFound => format!(
            "Sorry, I couldn't find any project matching \"{fragment}\". Please check the project name or try again!"
        ),
    }
}

fn format_project_tasks(project: &Project, snapshot: &Snapshot) -> String {
    let name = escape_markdown(&project.name);
    let tasks: Vec<_> = snapshot.tasks_for_project(project.id).collect();
    if tasks.is_empty() {
        return format!(
            "It looks like there are no tasks for **{name}** right now. Want to add some?"
        );
    }

    let mut lines = vec![format!("Here are the tasks for **{name}** ({}):", tasks.len())];
    lines.extend(tasks.iter().map(|task| {
        format!(
            "- **{}** _[{}]_ (Priority: {})",
            escape_markdown(&task.title),
            task.status_label(),
            task.priority_label()
        )
    }));
    lines.join("\n")
}

fn format_ambiguous(candidates: &[&Project]) -> String {
    let mut lines = vec!["I found multiple projects matching your query:".to_string()];
    lines.extend(
        candidates
            .iter()
            .map(|project| format!("- {}", escape_markdown(&project.name))),
    );
    lines.push("Please specify which one you mean!".to_string());
    lines.join("\n")
}

/// Backslash-escapes characters that would change markdown emphasis/links.
pub fn escape_markdown(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '*' | '_' | '`' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_markdown;

    #[test]
    fn escape_markdown_guards_emphasis_and_links() {
        assert_eq!(escape_markdown("fix *all* [links]"), r"fix \*all\* \[links\]");
        assert_eq!(escape_markdown("snake_case"), r"snake\_case");
        assert_eq!(escape_markdown("Apollo Launch"), "Apollo Launch");
    }
}
