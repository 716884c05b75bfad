//! Plain-text rendering of teams, issues and labels for the terminal.

use std::fmt::Write;

use crate::model::{Issue, Label, Team};

/// One line per team.
#[must_use]
pub fn render_teams(teams: &[Team]) -> String {
    let mut out = String::new();
    for team in teams {
        let _ = writeln!(out, "Team: ID={}, Name={}", team.id, team.name);
    }
    out
}

/// A team header followed by its issues.
///
/// With `titles_only`, each issue is a bare title line; otherwise non-empty
/// fields are listed under each issue.
#[must_use]
pub fn render_team_issues(team: &Team, titles_only: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Team: {}", team.name);
    for issue in &team.issues {
        if titles_only {
            let _ = writeln!(out, "{}", issue.title);
        } else {
            render_issue(&mut out, issue);
        }
    }
    out
}

fn render_issue(out: &mut String, issue: &Issue) {
    let _ = writeln!(out, "Issue: ID={}, Title={}", issue.id, issue.title);
    if !issue.description.is_empty() {
        let _ = writeln!(out, "  Description: {}", issue.description);
    }
    if issue.is_assigned() {
        let _ = writeln!(out, "  Assignee: {}", issue.assignee.name);
    }
    if issue.priority.value() > 0 {
        let _ = writeln!(out, "  Priority: {}", issue.priority);
    }
    if !issue.status_name.is_empty() {
        let _ = writeln!(out, "  Status: {}", issue.status_name);
    }
    if !issue.labels.is_empty() {
        let names: Vec<&str> = issue.labels.iter().map(|l| l.name.as_str()).collect();
        let _ = writeln!(out, "  Labels: {}", names.join(", "));
    }
}

/// One line per label.
#[must_use]
pub fn render_labels(labels: &[Label]) -> String {
    let mut out = String::new();
    for label in labels {
        let _ = writeln!(out, "Label: ID={}, Name={}", label.id, label.name);
    }
    out
}
