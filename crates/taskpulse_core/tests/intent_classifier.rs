use taskpulse_core::{classify, classify_in, Intent, IntentKind, Project};

#[test]
fn enumeration_requests_map_to_list_intents() {
    for input in ["projects", "project", "list projects", "Show all projects", "display the projects!"] {
        assert_eq!(classify(input), Intent::ListProjects, "input: {input}");
    }
    for input in ["tasks", "task", "list all tasks", "what are my tasks?", "show me every task"] {
        assert_eq!(classify(input), Intent::ListAllTasks, "input: {input}");
    }
}

#[test]
fn project_scoped_requests_extract_fragment() {
    assert_eq!(
        classify("tasks for apollo"),
        Intent::TasksForProject("apollo".to_string())
    );
    assert_eq!(
        classify("Show tasks in Apollo Launch?"),
        Intent::TasksForProject("apollo launch".to_string())
    );
    assert_eq!(
        classify("task about mars-rover"),
        Intent::TasksForProject("mars-rover".to_string())
    );
}

#[test]
fn trailing_filler_still_enumerates() {
    for input in [
        "show all tasks please",
        "how many tasks do we have?",
        "how many tasks are there",
        "list my tasks in total",
    ] {
        assert_eq!(classify(input), Intent::ListAllTasks, "input: {input}");
    }
    assert_eq!(classify("how many projects do we have"), Intent::ListProjects);
}

#[test]
fn connector_less_text_needs_a_known_project() {
    assert_eq!(
        classify("what tasks are overdue?"),
        Intent::FreeForm("what tasks are overdue?".to_string())
    );
    assert_eq!(classify("tasks gemini").kind(), IntentKind::FreeForm);

    let projects = vec![Project::new(1, "Gemini"), Project::new(2, "Forge")];
    assert_eq!(
        classify_in("tasks gemini", &projects),
        Intent::TasksForProject("gemini".to_string())
    );
    assert_eq!(
        classify_in("what tasks are overdue?", &projects).kind(),
        IntentKind::FreeForm
    );
}

#[test]
fn prepositions_only_count_as_whole_words() {
    assert_eq!(classify("tasks forge").kind(), IntentKind::FreeForm);
    assert_eq!(
        classify_in("tasks forge", &[Project::new(1, "Forge")]),
        Intent::TasksForProject("forge".to_string())
    );
}

#[test]
fn fragment_keeps_punctuation_up_to_end_of_line() {
    assert_eq!(
        classify("tasks for R&D"),
        Intent::TasksForProject("r&d".to_string())
    );
    assert_eq!(
        classify("tasks for x/y"),
        Intent::TasksForProject("x/y".to_string())
    );
    assert_eq!(
        classify("tasks for v2.0 launch?"),
        Intent::TasksForProject("v2.0 launch".to_string())
    );
    assert_eq!(
        classify("tasks about \"Apollo: Phase 2\""),
        Intent::TasksForProject("apollo: phase 2".to_string())
    );
}

#[test]
fn scoping_tokens_block_the_all_tasks_rule() {
    assert_eq!(
        classify("tasks for project 42"),
        Intent::TasksForProject("42".to_string())
    );
    assert_eq!(classify("tasks 7").kind(), IntentKind::FreeForm);
    assert_eq!(
        classify_in("tasks 7", &[Project::new(1, "Sprint 7")]),
        Intent::TasksForProject("7".to_string())
    );
}

#[test]
fn empty_fragment_is_free_form_not_a_wildcard() {
    assert_eq!(classify("tasks for"), Intent::FreeForm("tasks for".to_string()));
    assert_eq!(
        classify("tasks for the project"),
        Intent::FreeForm("tasks for the project".to_string())
    );
}

#[test]
fn everything_else_is_free_form_with_original_casing() {
    assert_eq!(
        classify("  Which deadline is closest?  "),
        Intent::FreeForm("Which deadline is closest?".to_string())
    );
    assert_eq!(classify("projects overview please").kind(), IntentKind::FreeForm);
}
