use proptest::prelude::*;
use taskpulse_core::{match_projects, resolve_projects, Project, Resolution};

fn catalog() -> Vec<Project> {
    vec![
        Project::new(1, "Apollo Launch"),
        Project::new(2, "Apollo Rescue"),
        Project::new(3, "Mars Rover Telemetry"),
        Project::new(4, "Website Redesign"),
    ]
}

#[test]
fn single_token_resolves_uniquely() {
    let projects = vec![Project::new(1, "Apollo Launch")];
    match resolve_projects("apollo", &projects) {
        Resolution::Unique(project) => assert_eq!(project.id, 1),
        other => panic!("expected unique match, got {other:?}"),
    }
}

#[test]
fn substring_tokens_are_enough() {
    let projects = catalog();
    match resolve_projects("rov tele", &projects) {
        Resolution::Unique(project) => assert_eq!(project.id, 3),
        other => panic!("expected unique match, got {other:?}"),
    }
}

#[test]
fn multiple_candidates_are_reported_in_store_order() {
    let projects = catalog();
    let Resolution::Ambiguous(candidates) = resolve_projects("apollo", &projects) else {
        panic!("expected ambiguous resolution");
    };
    let names: Vec<_> = candidates.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Apollo Launch", "Apollo Rescue"]);
}

#[test]
fn unmatched_token_means_not_found() {
    let projects = catalog();
    assert_eq!(resolve_projects("apollo venus", &projects), Resolution::NotFound);
    assert_eq!(resolve_projects("zzz", &[]), Resolution::NotFound);
}

fn token() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "apollo", "launch", "rescue", "mars", "rover", "re", "a", "site", "x", "o",
    ])
    .prop_map(str::to_string)
}

proptest! {
    #[test]
    fn adding_a_token_never_grows_the_match_set(
        base in prop::collection::vec(token(), 1..4),
        extra in token(),
    ) {
        let projects = catalog();
        let shorter = base.join(" ");
        let longer = format!("{shorter} {extra}");

        let short_ids: Vec<_> = match_projects(&shorter, &projects).iter().map(|p| p.id).collect();
        let long_ids: Vec<_> = match_projects(&longer, &projects).iter().map(|p| p.id).collect();

        prop_assert!(long_ids.len() <= short_ids.len());
        for id in long_ids {
            prop_assert!(short_ids.contains(&id));
        }
    }
}
