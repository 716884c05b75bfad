//! Typed operations and the requests built from them.

use serde::Serialize;
use serde_json::{json, Value};

use super::documents;
use crate::error::{Error, Result};
use crate::model::IssueChange;

/// A ready-to-send GraphQL request.
///
/// Serializes to the standard `{"query", "variables", "operationName"}` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    /// Operation name declared in the document.
    pub operation_name: &'static str,
    /// The document itself.
    pub query: &'static str,
    /// Variable bindings; an empty object when the document declares none.
    pub variables: Value,
}

/// Every operation the client can issue, with the inputs it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation<'a> {
    /// All teams visible to the API key.
    ListTeams,
    /// One team with its issues.
    TeamIssues {
        /// Team to list.
        team_id: &'a str,
    },
    /// Teams whose name contains `name`, ignoring case.
    FindTeams {
        /// Name fragment.
        name: &'a str,
    },
    /// Issues whose title contains `title`, ignoring case.
    FindIssues {
        /// Restrict the search to this team when set.
        team_id: Option<&'a str>,
        /// Title fragment.
        title: &'a str,
    },
    /// Create an issue.
    CreateIssue {
        /// Owning team.
        team_id: &'a str,
        /// Issue title; must be non-empty.
        title: &'a str,
        /// Description; empty when none was given.
        description: &'a str,
    },
    /// Delete an issue.
    DeleteIssue {
        /// Issue to delete.
        id: &'a str,
    },
    /// Change one field of an issue.
    UpdateIssue {
        /// Issue to update.
        id: &'a str,
        /// The field and its new value.
        change: &'a IssueChange,
    },
    /// All labels in the workspace.
    ListLabels,
    /// Labels applied to one issue.
    IssueLabels {
        /// Issue to inspect.
        issue_id: &'a str,
    },
    /// Labels whose name equals `name`, ignoring case.
    FindLabel {
        /// Exact label name.
        name: &'a str,
    },
    /// Create a workspace label.
    CreateLabel {
        /// Label name.
        name: &'a str,
    },
    /// Attach a label to an issue.
    AddLabel {
        /// Issue to label.
        issue_id: &'a str,
        /// Label to attach.
        label_id: &'a str,
    },
    /// Detach a label from an issue.
    RemoveLabel {
        /// Issue to unlabel.
        issue_id: &'a str,
        /// Label to detach.
        label_id: &'a str,
    },
}

impl Operation<'_> {
    /// Validates the inputs and renders the request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when a required input is empty.
    pub fn build(&self) -> Result<GraphqlRequest> {
        let (operation_name, query, variables) = match *self {
            Self::ListTeams => ("Teams", documents::TEAMS, json!({})),
            Self::TeamIssues { team_id } => {
                require("team ID", team_id)?;
                ("TeamIssues", documents::TEAM_ISSUES, json!({ "teamId": team_id }))
            }
            Self::FindTeams { name } => {
                require("team name", name)?;
                ("FindTeams", documents::FIND_TEAMS, json!({ "name": name }))
            }
            Self::FindIssues { team_id, title } => {
                require("title", title)?;
                match team_id.filter(|id| !id.is_empty()) {
                    Some(team_id) => (
                        "FindTeamIssues",
                        documents::FIND_TEAM_ISSUES,
                        json!({ "teamId": team_id, "title": title }),
                    ),
                    None => ("FindIssues", documents::FIND_ISSUES, json!({ "title": title })),
                }
            }
            Self::CreateIssue { team_id, title, description } => {
                require("title", title)?;
                require("team ID", team_id)?;
                let input = json!({
                    "title": title,
                    "description": description,
                    "teamId": team_id,
                });
                ("IssueCreate", documents::ISSUE_CREATE, json!({ "input": input }))
            }
            Self::DeleteIssue { id } => {
                require("issue ID", id)?;
                ("IssueDelete", documents::ISSUE_DELETE, json!({ "id": id }))
            }
            Self::UpdateIssue { id, change } => {
                require("issue ID", id)?;
                (
                    "IssueUpdate",
                    documents::ISSUE_UPDATE,
                    json!({ "issueUpdateId": id, "input": update_input(change) }),
                )
            }
            Self::ListLabels => ("Labels", documents::LABELS, json!({})),
            Self::IssueLabels { issue_id } => {
                require("issue ID", issue_id)?;
                ("IssueLabels", documents::ISSUE_LABELS, json!({ "id": issue_id }))
            }
            Self::FindLabel { name } => {
                require("label name", name)?;
                ("FindLabel", documents::FIND_LABEL, json!({ "name": name }))
            }
            Self::CreateLabel { name } => {
                require("label name", name)?;
                ("IssueLabelCreate", documents::LABEL_CREATE, json!({ "input": { "name": name } }))
            }
            Self::AddLabel { issue_id, label_id } => {
                require("issue ID", issue_id)?;
                require("label ID", label_id)?;
                (
                    "IssueAddLabel",
                    documents::ISSUE_ADD_LABEL,
                    json!({ "issueId": issue_id, "labelId": label_id }),
                )
            }
            Self::RemoveLabel { issue_id, label_id } => {
                require("issue ID", issue_id)?;
                require("label ID", label_id)?;
                (
                    "IssueRemoveLabel",
                    documents::ISSUE_REMOVE_LABEL,
                    json!({ "issueId": issue_id, "labelId": label_id }),
                )
            }
        };

        Ok(GraphqlRequest { operation_name, query, variables })
    }
}

/// The update input carries exactly the one field being changed.
fn update_input(change: &IssueChange) -> Value {
    match change {
        IssueChange::Assignee(id) => json!({ "assigneeId": id }),
        IssueChange::Description(text) => json!({ "description": text }),
        IssueChange::Priority(p) => json!({ "priority": p.value() }),
        IssueChange::Status(state_id) => json!({ "stateId": state_id }),
    }
}

pub(crate) fn require(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{what} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;

    #[test]
    fn create_issue_rejects_empty_title() {
        let op = Operation::CreateIssue { team_id: "team-1", title: "", description: "" };
        let err = op.build().unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m.contains("title")));
    }

    #[test]
    fn create_issue_defaults_description_to_empty_string() {
        let op = Operation::CreateIssue { team_id: "team-1", title: "Fix login", description: "" };
        let req = op.build().unwrap();
        assert_eq!(req.operation_name, "IssueCreate");
        assert_eq!(
            req.variables,
            json!({ "input": { "title": "Fix login", "description": "", "teamId": "team-1" } })
        );
    }

    #[test]
    fn update_input_has_exactly_one_field() {
        let changes = [
            (IssueChange::Assignee("user-1".into()), json!({ "assigneeId": "user-1" })),
            (IssueChange::Description("new".into()), json!({ "description": "new" })),
            (IssueChange::Priority(Priority::new(2).unwrap()), json!({ "priority": 2 })),
            (IssueChange::Status("state-1".into()), json!({ "stateId": "state-1" })),
        ];

        for (change, expected) in &changes {
            let req = Operation::UpdateIssue { id: "issue-1", change }.build().unwrap();
            assert_eq!(req.variables["issueUpdateId"], "issue-1");
            assert_eq!(&req.variables["input"], expected);
            assert_eq!(req.variables["input"].as_object().unwrap().len(), 1);
        }
    }

    #[test]
    fn find_issues_picks_document_by_scope() {
        let scoped = Operation::FindIssues { team_id: Some("team-1"), title: "login" }
            .build()
            .unwrap();
        assert_eq!(scoped.operation_name, "FindTeamIssues");
        assert_eq!(scoped.variables, json!({ "teamId": "team-1", "title": "login" }));

        let unscoped = Operation::FindIssues { team_id: Some(""), title: "login" }.build().unwrap();
        assert_eq!(unscoped.operation_name, "FindIssues");
        assert_eq!(unscoped.variables, json!({ "title": "login" }));
    }

    #[test]
    fn label_search_is_exact_and_team_search_is_substring() {
        let label = Operation::FindLabel { name: "Bug" }.build().unwrap();
        assert!(label.query.contains("eqIgnoreCase"));

        let team = Operation::FindTeams { name: "eng" }.build().unwrap();
        assert!(team.query.contains("containsIgnoreCase"));
    }

    #[test]
    fn blank_identifiers_are_rejected() {
        assert!(Operation::DeleteIssue { id: "  " }.build().is_err());
        assert!(Operation::TeamIssues { team_id: "" }.build().is_err());
        assert!(Operation::AddLabel { issue_id: "i", label_id: "" }.build().is_err());
    }

    #[test]
    fn request_serializes_to_wire_body() {
        let req = Operation::DeleteIssue { id: "issue-9" }.build().unwrap();
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["operationName"], "IssueDelete");
        assert_eq!(body["variables"], json!({ "id": "issue-9" }));
        assert!(body["query"].as_str().unwrap().contains("issueDelete(id: $id)"));
    }
}
