use chrono::NaiveDate;
use taskpulse_core::{build_context, FallbackConfig, Priority, Project, Snapshot, Task, TaskStatus};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn snapshot() -> Snapshot {
    let mut apollo = Project::new(1, "Apollo");
    apollo.description = Some("Moon shot".to_string());
    apollo.start_date = Some("2024-01-05T00:00:00Z".to_string());
    let mut gemini = Project::new(2, "Gemini");
    gemini.start_date = Some("2023-02-01".to_string());
    gemini.end_date = Some("2023-12-31T18:00:00Z".to_string());

    let mut fuel = Task::new(1, "Fuel check");
    fuel.project_id = Some(1);
    fuel.status = Some(TaskStatus::ToDo);
    fuel.priority = Some(Priority::High);
    fuel.due_date = Some("2024-07-01T00:00:00Z".to_string());
    let mut stray = Task::new(2, "Stray");
    stray.project_id = Some(42);

    Snapshot::new(vec![apollo, gemini], vec![fuel, stray])
}

#[test]
fn summary_counts_and_project_paragraphs() {
    let context = build_context(&snapshot(), today(), &FallbackConfig::default());

    assert!(context.starts_with("Project management data as of 2024-06-15:"));
    assert!(context.contains("- Total Projects: 2\n"));
    assert!(context.contains("- Total Tasks: 2\n"));
    assert!(context.contains("- Active Projects: 1\n"));
    assert!(context.contains("- Completed Projects: 1\n"));

    assert!(context.contains(
        "Project: Apollo\n   Description: Moon shot\n   Status: Active\n   Timeline: 2024-01-05 to Not set\n   Tasks (1):\n   • [To Do] Fuel check - Priority: High, Due: 2024-07-01\n"
    ));
    assert!(context.contains(
        "Project: Gemini\n   Description: N/A\n   Status: Completed\n   Timeline: 2023-02-01 to 2023-12-31\n   Tasks (0):\n"
    ));
    assert!(context.contains("Tasks without a known project:\n   Tasks (1):\n   • [No status] Stray"));
    assert!(!context.contains("omitted"));
}

fn bounded(max_context_chars: usize) -> String {
    let config = FallbackConfig { max_context_chars };
    let context = build_context(&snapshot(), today(), &config);
    assert!(
        context.chars().count() <= max_context_chars,
        "context of {} chars exceeds {max_context_chars}",
        context.chars().count()
    );
    context
}

#[test]
fn oversized_context_counts_dropped_projects_and_unassigned_tasks_apart() {
    let context = bounded(400);

    assert!(context.contains("Project: Apollo"));
    assert!(!context.contains("Project: Gemini"));
    assert!(!context.contains("Stray"));
    assert!(context.contains("- Total Projects: 2"));
    assert!(context.ends_with("\n... (1 more projects and unassigned tasks omitted)\n"));
}

#[test]
fn dropping_only_unassigned_tasks_says_so() {
    let context = bounded(480);

    assert!(context.contains("Project: Gemini"));
    assert!(!context.contains("Stray"));
    assert!(context.ends_with("\n... (unassigned tasks omitted)\n"));
    assert!(!context.contains("more projects"));
}

#[test]
fn omission_line_is_reserved_inside_the_bound() {
    assert!(bounded(372).contains("Project: Apollo"));

    let context = bounded(371);
    assert!(!context.contains("Project: Apollo"));
    assert!(context.ends_with("\n... (2 more projects and unassigned tasks omitted)\n"));
}

#[test]
fn exact_fit_keeps_everything_without_trailer() {
    let context = bounded(533);
    assert!(context.contains("• [No status] Stray"));
    assert!(!context.contains("omitted"));
}
