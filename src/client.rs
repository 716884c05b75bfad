//! The Linear client: one method per user-facing action.
//!
//! Every method renders an [`Operation`], sends it through the configured
//! [`GraphqlTransport`], decodes the envelope and, for name-based lookups,
//! applies the resolver's uniqueness rules. Nothing is cached between calls.

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::display;
use crate::error::{Error, Result};
use crate::graphql::decode;
use crate::graphql::operation::require;
use crate::graphql::Operation;
use crate::model::{Issue, IssueChange, Label, Priority, Team};
use crate::ports::GraphqlTransport;
use crate::resolver::{self, EntityKind};
use crate::status::StatusTable;

/// Client for the Linear GraphQL API.
pub struct LinearClient {
    transport: Box<dyn GraphqlTransport>,
    statuses: StatusTable,
}

impl LinearClient {
    /// Creates a client over `transport`, translating status names through `statuses`.
    #[must_use]
    pub fn new(transport: Box<dyn GraphqlTransport>, statuses: StatusTable) -> Self {
        Self { transport, statuses }
    }

    async fn execute(&self, operation: Operation<'_>, cancel: &CancellationToken) -> Result<Value> {
        let request = operation.build()?;
        self.transport.execute(&request, cancel).await.map_err(Error::from)
    }

    // --- Teams ---

    /// All teams visible to the API key.
    ///
    /// # Errors
    ///
    /// Transport and remote-protocol errors.
    pub async fn teams(&self, cancel: &CancellationToken) -> Result<Vec<Team>> {
        decode::teams(self.execute(Operation::ListTeams, cancel).await?)
    }

    /// All teams, rendered for the terminal.
    ///
    /// # Errors
    ///
    /// See [`Self::teams`].
    pub async fn display_teams(&self, cancel: &CancellationToken) -> Result<String> {
        Ok(display::render_teams(&self.teams(cancel).await?))
    }

    /// One team with its issues.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for an empty ID, [`Error::NotFound`] when the
    /// team does not exist, plus transport and remote-protocol errors.
    pub async fn team_issues(&self, team_id: &str, cancel: &CancellationToken) -> Result<Team> {
        let envelope = self.execute(Operation::TeamIssues { team_id }, cancel).await?;
        decode::team_issues(envelope, team_id)
    }

    /// A team's issues rendered for the terminal, optionally titles only.
    ///
    /// # Errors
    ///
    /// See [`Self::team_issues`].
    pub async fn display_team_issues(
        &self,
        team_id: &str,
        titles_only: bool,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let team = self.team_issues(team_id, cancel).await?;
        Ok(display::render_team_issues(&team, titles_only))
    }

    /// ID of the one team whose name contains `name`, ignoring case.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] or [`Error::AmbiguousMatch`] when the name does
    /// not pick out exactly one team.
    pub async fn find_team_by_name(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let teams = decode::teams(self.execute(Operation::FindTeams { name }, cancel).await?)?;
        let id = resolver::unique(EntityKind::Team, name, decode::team_candidates(teams))?;
        log::debug!("team '{name}' resolved to {id}");
        Ok(id)
    }

    // --- Issues ---

    /// ID of the one issue whose title contains `title`, ignoring case.
    ///
    /// The search covers every team unless `team_id` is given.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] or [`Error::AmbiguousMatch`] when the title does
    /// not pick out exactly one issue.
    pub async fn find_issue_by_title(
        &self,
        team_id: Option<&str>,
        title: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let envelope = self.execute(Operation::FindIssues { team_id, title }, cancel).await?;
        let issues = decode::issues(envelope)?;
        let id = resolver::unique(EntityKind::Issue, title, decode::issue_candidates(issues))?;
        log::debug!("issue '{title}' resolved to {id}");
        Ok(id)
    }

    /// Creates an issue in `team_id` and returns it.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for an empty title (no request is sent),
    /// [`Error::OperationRejected`] when Linear reports failure.
    pub async fn add_issue(
        &self,
        team_id: &str,
        title: &str,
        description: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Issue> {
        let description = description.unwrap_or_default();
        let envelope =
            self.execute(Operation::CreateIssue { team_id, title, description }, cancel).await?;
        let issue = decode::created_issue(envelope)?;
        log::debug!("created issue {} '{}'", issue.id, issue.title);
        Ok(issue)
    }

    /// Deletes an issue.
    ///
    /// # Errors
    ///
    /// [`Error::OperationRejected`] when Linear reports failure; an unknown
    /// ID surfaces however Linear answers it.
    pub async fn delete_issue(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        let envelope = self.execute(Operation::DeleteIssue { id }, cancel).await?;
        decode::mutation_success(envelope, "issueDelete", "issue deletion")
    }

    /// Assigns the issue to the user with `assignee_id`.
    ///
    /// # Errors
    ///
    /// See [`Self::delete_issue`].
    pub async fn update_assignee(
        &self,
        id: &str,
        assignee_id: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        self.update(id, &IssueChange::Assignee(assignee_id.to_string()), cancel).await
    }

    /// Replaces the issue's description.
    ///
    /// # Errors
    ///
    /// See [`Self::delete_issue`].
    pub async fn update_description(
        &self,
        id: &str,
        description: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        self.update(id, &IssueChange::Description(description.to_string()), cancel).await
    }

    /// Sets the issue's priority.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] when `priority` is outside 0..=4 (no request is
    /// sent); otherwise see [`Self::delete_issue`].
    pub async fn update_priority(
        &self,
        id: &str,
        priority: i64,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let priority = Priority::new(priority)?;
        self.update(id, &IssueChange::Priority(priority), cancel).await
    }

    /// Moves the issue to the workflow state named `status`.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] when `status` is not in the status table (no
    /// request is sent); otherwise see [`Self::delete_issue`].
    pub async fn update_status(
        &self,
        id: &str,
        status: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let state_id = self.statuses.resolve(status)?;
        log::debug!("status '{status}' resolved to {state_id}");
        self.update(id, &IssueChange::Status(state_id.to_string()), cancel).await
    }

    async fn update(
        &self,
        id: &str,
        change: &IssueChange,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let envelope = self.execute(Operation::UpdateIssue { id, change }, cancel).await?;
        let action = match change {
            IssueChange::Assignee(_) => "assignee update",
            IssueChange::Description(_) => "description update",
            IssueChange::Priority(_) => "priority update",
            IssueChange::Status(_) => "status update",
        };
        decode::mutation_success(envelope, "issueUpdate", action)?;
        log::debug!("updated {} on issue {id}", change.field());
        Ok(())
    }

    // --- Labels ---

    /// Every workspace label, or only those on `issue_id` when given.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the issue does not exist, plus transport and
    /// remote-protocol errors.
    pub async fn labels(
        &self,
        issue_id: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Label>> {
        match issue_id {
            Some(issue_id) => {
                let envelope = self.execute(Operation::IssueLabels { issue_id }, cancel).await?;
                decode::issue_labels(envelope, issue_id)
            }
            None => decode::labels(self.execute(Operation::ListLabels, cancel).await?),
        }
    }

    /// The label named exactly `name` (ignoring case), if there is one.
    ///
    /// # Errors
    ///
    /// [`Error::AmbiguousMatch`] if Linear returns more than one label.
    pub async fn search_label(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Label>> {
        let labels = decode::labels(self.execute(Operation::FindLabel { name }, cancel).await?)?;
        let candidates = decode::label_candidates(labels.clone());
        let Some(id) = resolver::at_most_one(EntityKind::Label, name, candidates)? else {
            log::debug!("no label named '{name}'");
            return Ok(None);
        };
        Ok(labels.into_iter().find(|label| label.id == id))
    }

    /// Creates a workspace label.
    ///
    /// # Errors
    ///
    /// [`Error::OperationRejected`] when Linear reports failure.
    pub async fn create_label(&self, name: &str, cancel: &CancellationToken) -> Result<Label> {
        let envelope = self.execute(Operation::CreateLabel { name }, cancel).await?;
        let label = decode::created_label(envelope)?;
        log::debug!("created label {} '{}'", label.id, label.name);
        Ok(label)
    }

    /// Attaches the label `name` to an issue, creating the label first if no
    /// label has that name. Returns the attached label.
    ///
    /// The steps are not transactional: a label created here stays even if
    /// attaching it fails.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for empty inputs (no request is sent), plus any
    /// error from the lookup, creation or attach step.
    pub async fn add_label_to_issue(
        &self,
        issue_id: &str,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<Label> {
        require("issue ID", issue_id)?;
        let label = match self.search_label(name, cancel).await? {
            Some(label) => label,
            None => self.create_label(name, cancel).await?,
        };
        let envelope =
            self.execute(Operation::AddLabel { issue_id, label_id: &label.id }, cancel).await?;
        decode::mutation_success(envelope, "issueAddLabel", "label assignment")?;
        Ok(label)
    }

    /// Detaches the label `name` from an issue.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no label has that name, in which case no
    /// detach request is sent.
    pub async fn remove_label_from_issue(
        &self,
        issue_id: &str,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        require("issue ID", issue_id)?;
        let label = self
            .search_label(name, cancel)
            .await?
            .ok_or_else(|| Error::NotFound { kind: EntityKind::Label, query: name.to_string() })?;
        let envelope =
            self.execute(Operation::RemoveLabel { issue_id, label_id: &label.id }, cancel).await?;
        decode::mutation_success(envelope, "issueRemoveLabel", "label removal")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::adapters::replaying::ReplayingTransport;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::error::TransportError;

    /// Builds a client replaying `script` and returns it with its call log.
    fn replay(script: Vec<(&str, Value)>) -> (LinearClient, Arc<Mutex<Vec<String>>>) {
        let interactions = script
            .into_iter()
            .zip(0..)
            .map(|((operation, output), seq)| Interaction {
                seq,
                port: "graphql".into(),
                method: "execute".into(),
                input: json!({ "operation": operation }),
                output,
            })
            .collect();
        let cassette = Cassette {
            name: "client".into(),
            recorded_at: Utc::now(),
            endpoint: String::new(),
            interactions,
        };
        let transport = ReplayingTransport::from_cassette(&cassette);
        let calls = transport.call_log();
        let statuses = StatusTable::new([("todo", "state-todo"), ("in progress", "state-wip")]);
        (LinearClient::new(Box::new(transport), statuses), calls)
    }

    fn ok(data: Value) -> Value {
        json!({ "Ok": { "data": data } })
    }

    fn calls(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn created_issue_is_found_by_title() {
        let (client, log) = replay(vec![
            (
                "IssueCreate",
                ok(json!({ "issueCreate": {
                    "success": true,
                    "issue": { "id": "issue-9", "title": "Fix login flake", "description": "" }
                }})),
            ),
            (
                "FindTeamIssues",
                ok(json!({ "issues": { "nodes": [
                    { "id": "issue-9", "title": "Fix login flake" }
                ] } })),
            ),
        ]);
        let cancel = CancellationToken::new();

        let created = client.add_issue("team-1", "Fix login flake", None, &cancel).await.unwrap();
        let found =
            client.find_issue_by_title(Some("team-1"), "login flake", &cancel).await.unwrap();

        assert_eq!(found, created.id);
        assert_eq!(calls(&log), vec!["IssueCreate", "FindTeamIssues"]);
    }

    #[tokio::test]
    async fn empty_title_is_rejected_without_any_call() {
        let (client, log) = replay(vec![]);

        let cancel = CancellationToken::new();
        let err = client.add_issue("team-1", "", Some("body"), &cancel).await.unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(calls(&log).is_empty());
    }

    #[tokio::test]
    async fn ambiguous_title_lists_matches() {
        let (client, _) = replay(vec![(
            "FindIssues",
            ok(json!({ "issues": { "nodes": [
                { "id": "i-1", "title": "Login bug" },
                { "id": "i-2", "title": "Login bug on mobile" }
            ] } })),
        )]);

        let cancel = CancellationToken::new();
        let err = client.find_issue_by_title(None, "login", &cancel).await.unwrap_err();

        match err {
            Error::AmbiguousMatch { kind, count, candidates, .. } => {
                assert_eq!(kind, EntityKind::Issue);
                assert_eq!(count, 2);
                assert_eq!(candidates, "Login bug, Login bug on mobile");
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_team_name_is_not_found() {
        let (client, _) = replay(vec![("FindTeams", ok(json!({ "teams": { "nodes": [] } })))]);

        let err = client.find_team_by_name("Nope", &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: EntityKind::Team, .. }));
    }

    #[tokio::test]
    async fn rejected_mutation_differs_from_server_error() {
        let (client, _) = replay(vec![
            ("IssueDelete", ok(json!({ "issueDelete": { "success": false } }))),
            ("IssueDelete", json!({ "Err": { "kind": "status", "status": 500, "body": "oops" } })),
        ]);
        let cancel = CancellationToken::new();

        let rejected = client.delete_issue("issue-1", &cancel).await.unwrap_err();
        assert!(matches!(rejected, Error::OperationRejected { action: "issue deletion" }));

        let failed = client.delete_issue("issue-1", &cancel).await.unwrap_err();
        assert!(matches!(
            failed,
            Error::Transport(TransportError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn graphql_errors_are_remote_protocol_errors() {
        let (client, _) = replay(vec![(
            "Teams",
            json!({ "Ok": { "data": null, "errors": [{ "message": "Authentication required" }] } }),
        )]);

        let err = client.teams(&CancellationToken::new()).await.unwrap_err();
        match err {
            Error::RemoteProtocol(msg) => assert!(msg.contains("Authentication required")),
            other => panic!("expected remote protocol error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn add_label_creates_missing_label_first() {
        let (client, log) = replay(vec![
            ("FindLabel", ok(json!({ "issueLabels": { "nodes": [] } }))),
            (
                "IssueLabelCreate",
                ok(json!({ "issueLabelCreate": {
                    "success": true, "issueLabel": { "id": "label-new", "name": "urgent" }
                }})),
            ),
            ("IssueAddLabel", ok(json!({ "issueAddLabel": { "success": true } }))),
        ]);

        let cancel = CancellationToken::new();
        let label = client.add_label_to_issue("issue-1", "urgent", &cancel).await.unwrap();

        assert_eq!(label.id, "label-new");
        assert_eq!(calls(&log), vec!["FindLabel", "IssueLabelCreate", "IssueAddLabel"]);
    }

    #[tokio::test]
    async fn add_label_reuses_existing_label() {
        let (client, log) = replay(vec![
            (
                "FindLabel",
                ok(json!({ "issueLabels": { "nodes": [{ "id": "label-1", "name": "Bug" }] } })),
            ),
            ("IssueAddLabel", ok(json!({ "issueAddLabel": { "success": true } }))),
        ]);

        let cancel = CancellationToken::new();
        let label = client.add_label_to_issue("issue-1", "bug", &cancel).await.unwrap();

        assert_eq!(label, Label { id: "label-1".into(), name: "Bug".into() });
        assert_eq!(calls(&log), vec!["FindLabel", "IssueAddLabel"]);
    }

    #[tokio::test]
    async fn remove_missing_label_sends_no_detach() {
        let (client, log) =
            replay(vec![("FindLabel", ok(json!({ "issueLabels": { "nodes": [] } })))]);

        let cancel = CancellationToken::new();
        let err = client.remove_label_from_issue("issue-1", "ghost", &cancel).await.unwrap_err();

        assert!(matches!(err, Error::NotFound { kind: EntityKind::Label, .. }));
        assert_eq!(calls(&log), vec!["FindLabel"]);
    }

    #[tokio::test]
    async fn remove_existing_label_detaches_it() {
        let (client, log) = replay(vec![
            (
                "FindLabel",
                ok(json!({ "issueLabels": { "nodes": [{ "id": "label-1", "name": "bug" }] } })),
            ),
            ("IssueRemoveLabel", ok(json!({ "issueRemoveLabel": { "success": true } }))),
        ]);

        client.remove_label_from_issue("issue-1", "bug", &CancellationToken::new()).await.unwrap();
        assert_eq!(calls(&log), vec!["FindLabel", "IssueRemoveLabel"]);
    }

    #[tokio::test]
    async fn unknown_status_fails_before_any_call() {
        let (client, log) = replay(vec![]);

        let cancel = CancellationToken::new();
        let err = client.update_status("issue-1", "blocked", &cancel).await.unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(calls(&log).is_empty());
    }

    #[tokio::test]
    async fn known_status_is_sent_as_state_id() {
        let (client, log) =
            replay(vec![("IssueUpdate", ok(json!({ "issueUpdate": { "success": true } })))]);

        client.update_status("issue-1", "In Progress", &CancellationToken::new()).await.unwrap();
        assert_eq!(calls(&log), vec!["IssueUpdate"]);
    }

    #[tokio::test]
    async fn out_of_range_priority_is_rejected_locally() {
        let (client, log) = replay(vec![]);

        let cancel = CancellationToken::new();
        let err = client.update_priority("issue-1", 7, &cancel).await.unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(calls(&log).is_empty());
    }

    #[tokio::test]
    async fn issue_labels_and_team_listing_decode() {
        let (client, _) = replay(vec![
            (
                "IssueLabels",
                ok(json!({ "issue": { "labels": { "nodes": [{ "id": "l-1", "name": "bug" }] } } })),
            ),
            (
                "TeamIssues",
                ok(json!({ "team": { "id": "team-1", "name": "Core", "issues": { "nodes": [
                    { "id": "i-1", "title": "Fix login", "assignee": null, "priority": 0.0 }
                ] } } })),
            ),
        ]);
        let cancel = CancellationToken::new();

        let labels = client.labels(Some("issue-1"), &cancel).await.unwrap();
        assert_eq!(labels, vec![Label { id: "l-1".into(), name: "bug".into() }]);

        let rendered = client.display_team_issues("team-1", true, &cancel).await.unwrap();
        assert_eq!(rendered, "Team: Core\nFix login\n");
    }

    #[tokio::test]
    async fn cancelled_token_stops_the_call() {
        let (client, log) = replay(vec![]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = client.teams(&cancel).await.unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Cancelled)));
        assert!(calls(&log).is_empty());
    }
}
