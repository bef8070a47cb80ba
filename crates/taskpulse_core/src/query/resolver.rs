//! Token-subset project name matching.
//!
//! # Invariants
//! - A project matches when its lower-cased name contains every
//!   whitespace-separated token of the fragment, in any order.
//! - Adding a token can only shrink the match set.
//! - A fragment with no tokens matches nothing.

use crate::model::project::Project;

/// Outcome of resolving a name fragment against the project list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    NotFound,
    Unique(&'a Project),
    /// Two or more candidates, in store order.
    Ambiguous(Vec<&'a Project>),
}

/// Returns every project whose name contains all tokens of `fragment`.
pub fn match_projects<'a>(fragment: &str, projects: &'a [Project]) -> Vec<&'a Project> {
    let tokens = tokenize(fragment);
    if tokens.is_empty() {
        return Vec::new();
    }

    projects
        .iter()
        .filter(|project| {
            let name = project.name.to_lowercase();
            tokens.iter().all(|token| name.contains(token.as_str()))
        })
        .collect()
}

/// Classifies the match set into the three caller-visible outcomes.
pub fn resolve_projects<'a>(fragment: &str, projects: &'a [Project]) -> Resolution<'a> {
    let mut matches = match_projects(fragment, projects);
    match matches.len() {
        0 => Resolution::NotFound,
        1 => Resolution::Unique(matches.remove(0)),
        _ => Resolution::Ambiguous(matches),
    }
}

fn tokenize(fragment: &str) -> Vec<String> {
    fragment
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{match_projects, resolve_projects, Resolution};
    use crate::model::project::Project;

    fn projects() -> Vec<Project> {
        vec![
            Project::new(1, "Apollo Launch"),
            Project::new(2, "Apollo Rescue"),
            Project::new(3, "Gemini"),
        ]
    }

    #[test]
    fn tokens_match_in_any_order_case_insensitively() {
        let projects = projects();
        let hits = match_projects("LAUNCH apo", &projects);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn blank_fragment_matches_nothing() {
        let projects = projects();
        assert!(match_projects("   ", &projects).is_empty());
        assert_eq!(resolve_projects("", &projects), Resolution::NotFound);
    }

    #[test]
    fn shared_prefix_is_ambiguous() {
        let projects = projects();
        match resolve_projects("apollo", &projects) {
            Resolution::Ambiguous(candidates) => {
                let ids: Vec<_> = candidates.iter().map(|p| p.id).collect();
                assert_eq!(ids, vec![1, 2]);
            }
            other => panic!("expected ambiguous, got {other:?}"),
        }
    }
}
