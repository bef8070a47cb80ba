//! Ordered-rule intent classifier.
//!
//! # Responsibility
//! - Map one chat message to exactly one `Intent`.
//!
//! # Invariants
//! - Rules are evaluated top to bottom and the first match wins:
//!   list projects, list all tasks, tasks for a named project, tasks followed
//!   by a known project name, free form.
//! - The "all tasks" rule runs before the project-scoped rules so a bare
//!   `tasks` never reaches fragment extraction.
//! - A fragment is everything after the connector, minus surrounding quotes
//!   and whitespace; it is never cut at punctuation.
//! - Without a connector (`for`, `in`, `of`, `on`, `about`, `project`) the
//!   trailing text only counts as a fragment when it names a known project.
//! - An empty fragment is never turned into `TasksForProject`.

use crate::model::project::Project;
use crate::query::resolver::match_projects;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

const FILLER: &str =
    r"(?:(?:please|show|list|display|give|get|me|all|the|my|every|what|are|is|of|how\s+many)\s+)*";
const TRAILING_FILLER: &str = r"(?:\s+(?:please|(?:do|did|are|have)\s+(?:we|i|you|there)(?:\s+(?:have|got))?|there\s+are|we\s+have|in\s+total|overall|right\s+now))*";

static LIST_PROJECTS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{FILLER}projects?{TRAILING_FILLER}$"))
        .expect("valid list-projects regex")
});
static LIST_TASKS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{FILLER}tasks?{TRAILING_FILLER}$")).expect("valid list-tasks regex")
});
static PROJECT_SCOPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d|project|\bid\b").expect("valid scope regex"));
static SCOPED_TASKS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\btasks?\s+(?:(?:for|in|of|on|about)\b(?:\s+the\b)?(?:\s+project\b)?|(?:the\s+)?project\b)(.*)$",
    )
    .expect("valid scoped-tasks regex")
});
static TRAILING_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\btasks?\s+(.*)$").expect("valid trailing-name regex"));

/// Classified purpose of one chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ListProjects,
    ListAllTasks,
    /// Lower-cased, trimmed project name fragment (never empty).
    TasksForProject(String),
    /// Trimmed original text, case preserved, for the fallback path.
    FreeForm(String),
}

/// Payload-free discriminant, used in logs and replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    ListProjects,
    ListAllTasks,
    TasksForProject,
    FreeForm,
}

impl IntentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListProjects => "list_projects",
            Self::ListAllTasks => "list_all_tasks",
            Self::TasksForProject => "tasks_for_project",
            Self::FreeForm => "free_form",
        }
    }
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Self::ListProjects => IntentKind::ListProjects,
            Self::ListAllTasks => IntentKind::ListAllTasks,
            Self::TasksForProject(_) => IntentKind::TasksForProject,
            Self::FreeForm(_) => IntentKind::FreeForm,
        }
    }
}

struct Rule {
    matches: fn(&str) -> bool,
    build: fn(&str, &[Project]) -> Option<Intent>,
}

const RULES: &[Rule] = &[
    Rule {
        matches: is_project_enumeration,
        build: build_list_projects,
    },
    Rule {
        matches: is_unscoped_task_enumeration,
        build: build_list_all_tasks,
    },
    Rule {
        matches: is_scoped_task_request,
        build: build_scoped_tasks,
    },
    Rule {
        matches: has_text_after_tasks,
        build: build_known_project_tasks,
    },
];

fn is_project_enumeration(text: &str) -> bool {
    LIST_PROJECTS_RE.is_match(text)
}

fn build_list_projects(_: &str, _: &[Project]) -> Option<Intent> {
    Some(Intent::ListProjects)
}

fn is_unscoped_task_enumeration(text: &str) -> bool {
    LIST_TASKS_RE.is_match(text) && !PROJECT_SCOPE_RE.is_match(text)
}

fn build_list_all_tasks(_: &str, _: &[Project]) -> Option<Intent> {
    Some(Intent::ListAllTasks)
}

fn is_scoped_task_request(text: &str) -> bool {
    SCOPED_TASKS_RE.is_match(text)
}

fn build_scoped_tasks(text: &str, _: &[Project]) -> Option<Intent> {
    capture_fragment(&SCOPED_TASKS_RE, text).map(Intent::TasksForProject)
}

fn has_text_after_tasks(text: &str) -> bool {
    TRAILING_NAME_RE.is_match(text) && !SCOPED_TASKS_RE.is_match(text)
}

fn build_known_project_tasks(text: &str, projects: &[Project]) -> Option<Intent> {
    let fragment = capture_fragment(&TRAILING_NAME_RE, text)?;
    if match_projects(&fragment, projects).is_empty() {
        return None;
    }
    Some(Intent::TasksForProject(fragment))
}

/// Classifies raw user text without project knowledge.
///
/// Input is trimmed and lower-cased before matching; trailing `?`, `.` and
/// `!` are ignored. `tasks <name>` without a connector stays free form here;
/// [`classify_in`] recognizes it against known projects.
pub fn classify(raw: &str) -> Intent {
    classify_in(raw, &[])
}

/// Classifies raw user text, resolving connector-less `tasks <name>`
/// requests against `projects`.
pub fn classify_in(raw: &str, projects: &[Project]) -> Intent {
    let original = raw.trim();
    let normalized = normalize(original);

    RULES
        .iter()
        .filter(|rule| (rule.matches)(&normalized))
        .find_map(|rule| (rule.build)(&normalized, projects))
        .unwrap_or_else(|| Intent::FreeForm(original.to_string()))
}

fn normalize(text: &str) -> String {
    text.trim_end_matches(['?', '.', '!'])
        .trim()
        .to_lowercase()
}

fn capture_fragment(pattern: &Regex, text: &str) -> Option<String> {
    let captures = pattern.captures(text)?;
    let fragment = captures
        .get(1)?
        .as_str()
        .trim_matches(|c: char| c.is_whitespace() || c == '\'' || c == '"');
    if fragment.is_empty() {
        return None;
    }
    Some(fragment.to_string())
}
