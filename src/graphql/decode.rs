//! Response decoding: envelope checks, success flags, and conversion of raw
//! response shapes into [`crate::model`] records.
//!
//! The raw structs mirror the selection sets in the documents and stay
//! private; every field that may be absent or null is optional here and
//! becomes an empty value in the model.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Assignee, Issue, Label, Priority, Team};
use crate::resolver::Candidate;

/// Extracts `data` from a GraphQL envelope and deserializes it into `T`.
///
/// # Errors
///
/// Returns [`Error::RemoteProtocol`] if the envelope carries errors, has no
/// data, or the data does not have the expected shape.
pub fn data<T: DeserializeOwned>(envelope: Value) -> Result<T> {
    let envelope: Envelope = serde_json::from_value(envelope)
        .map_err(|e| Error::RemoteProtocol(format!("malformed response envelope: {e}")))?;

    if !envelope.errors.is_empty() {
        let messages: Vec<&str> = envelope.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(Error::RemoteProtocol(messages.join("; ")));
    }

    match envelope.data {
        None | Some(Value::Null) => {
            Err(Error::RemoteProtocol("response carried no data".to_string()))
        }
        Some(data) => serde_json::from_value(data)
            .map_err(|e| Error::RemoteProtocol(format!("unexpected response shape: {e}"))),
    }
}

/// Turns a mutation's success flag into a result.
///
/// # Errors
///
/// Returns [`Error::OperationRejected`] when `success` is false.
pub fn ensure_success(action: &'static str, success: bool) -> Result<()> {
    if success {
        Ok(())
    } else {
        Err(Error::OperationRejected { action })
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
    #[serde(default)]
    message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<GraphqlError>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<GraphqlError>>::deserialize(deserializer)?.unwrap_or_default())
}

// --- Raw response shapes ---

#[derive(Deserialize)]
struct Connection<T> {
    #[serde(default = "Vec::new")]
    nodes: Vec<T>,
}

#[derive(Deserialize)]
struct RawTeam {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    issues: Option<Connection<RawIssue>>,
}

#[derive(Deserialize)]
struct RawIssue {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    priority: Option<f64>,
    #[serde(default)]
    assignee: Option<RawNamed>,
    #[serde(default)]
    state: Option<RawNamed>,
    #[serde(default)]
    labels: Option<Connection<RawNamed>>,
}

/// Any `{ id name }` selection: users, workflow states, labels.
#[derive(Deserialize)]
struct RawNamed {
    id: String,
    #[serde(default)]
    name: Option<String>,
}

impl From<RawTeam> for Team {
    fn from(raw: RawTeam) -> Self {
        Self {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            issues: raw
                .issues
                .map(|c| c.nodes.into_iter().map(Issue::from).collect())
                .unwrap_or_default(),
        }
    }
}

impl From<RawIssue> for Issue {
    fn from(raw: RawIssue) -> Self {
        let (status, status_name) =
            raw.state.map(|s| (s.id, s.name.unwrap_or_default())).unwrap_or_default();
        Self {
            priority: raw.priority.map(priority_from_remote).unwrap_or_default(),
            assignee: raw
                .assignee
                .map(|a| Assignee { id: a.id, name: a.name.unwrap_or_default() })
                .unwrap_or_default(),
            labels: raw
                .labels
                .map(|c| c.nodes.into_iter().map(Label::from).collect())
                .unwrap_or_default(),
            id: raw.id,
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            status,
            status_name,
        }
    }
}

impl From<RawNamed> for Label {
    fn from(raw: RawNamed) -> Self {
        Self { id: raw.id, name: raw.name.unwrap_or_default() }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn priority_from_remote(value: f64) -> Priority {
    let rounded = value.round();
    if rounded.is_finite() {
        if let Ok(p) = Priority::new(rounded as i64) {
            return p;
        }
    }
    log::warn!("ignoring out-of-range priority {value} from remote");
    Priority::NONE
}

// --- Per-operation data shapes ---

#[derive(Deserialize)]
struct TeamsData {
    teams: Connection<RawTeam>,
}

#[derive(Deserialize)]
struct TeamData {
    team: Option<RawTeam>,
}

#[derive(Deserialize)]
struct IssuesData {
    issues: Connection<RawIssue>,
}

#[derive(Deserialize)]
struct LabelsData {
    #[serde(rename = "issueLabels")]
    issue_labels: Connection<RawNamed>,
}

#[derive(Deserialize)]
struct IssueLabelsData {
    issue: Option<IssueLabelsNode>,
}

#[derive(Deserialize)]
struct IssueLabelsNode {
    labels: Connection<RawNamed>,
}

#[derive(Deserialize)]
struct SuccessPayload {
    #[serde(default)]
    success: bool,
}

#[derive(Deserialize)]
struct IssueCreateData {
    #[serde(rename = "issueCreate")]
    issue_create: IssueCreatePayload,
}

#[derive(Deserialize)]
struct IssueCreatePayload {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    issue: Option<RawIssue>,
}

#[derive(Deserialize)]
struct LabelCreateData {
    #[serde(rename = "issueLabelCreate")]
    issue_label_create: LabelCreatePayload,
}

#[derive(Deserialize)]
struct LabelCreatePayload {
    #[serde(default)]
    success: bool,
    #[serde(default, rename = "issueLabel")]
    issue_label: Option<RawNamed>,
}

// --- Public decoders, one per operation ---

/// Decodes `Teams` and `FindTeams`.
///
/// # Errors
///
/// See [`data`].
pub fn teams(envelope: Value) -> Result<Vec<Team>> {
    let data: TeamsData = data(envelope)?;
    Ok(data.teams.nodes.into_iter().map(Team::from).collect())
}

/// Decodes `TeamIssues`. A null team means the ID does not exist.
///
/// # Errors
///
/// See [`data`]; additionally [`Error::NotFound`] for a null team.
pub fn team_issues(envelope: Value, team_id: &str) -> Result<Team> {
    let data: TeamData = data(envelope)?;
    data.team.map(Team::from).ok_or_else(|| Error::NotFound {
        kind: crate::resolver::EntityKind::Team,
        query: team_id.to_string(),
    })
}

/// Decodes `FindIssues` / `FindTeamIssues`.
///
/// # Errors
///
/// See [`data`].
pub fn issues(envelope: Value) -> Result<Vec<Issue>> {
    let data: IssuesData = data(envelope)?;
    Ok(data.issues.nodes.into_iter().map(Issue::from).collect())
}

/// Decodes `Labels` and `FindLabel`.
///
/// # Errors
///
/// See [`data`].
pub fn labels(envelope: Value) -> Result<Vec<Label>> {
    let data: LabelsData = data(envelope)?;
    Ok(data.issue_labels.nodes.into_iter().map(Label::from).collect())
}

/// Decodes `IssueLabels`. A null issue means the ID does not exist.
///
/// # Errors
///
/// See [`data`]; additionally [`Error::NotFound`] for a null issue.
pub fn issue_labels(envelope: Value, issue_id: &str) -> Result<Vec<Label>> {
    let data: IssueLabelsData = data(envelope)?;
    let issue = data.issue.ok_or_else(|| Error::NotFound {
        kind: crate::resolver::EntityKind::Issue,
        query: issue_id.to_string(),
    })?;
    Ok(issue.labels.nodes.into_iter().map(Label::from).collect())
}

/// Decodes `IssueCreate`, returning the created issue.
///
/// # Errors
///
/// See [`data`]; [`Error::OperationRejected`] when `success` is false;
/// [`Error::RemoteProtocol`] when the payload omits the issue.
pub fn created_issue(envelope: Value) -> Result<Issue> {
    let data: IssueCreateData = data(envelope)?;
    ensure_success("issue creation", data.issue_create.success)?;
    data.issue_create.issue.map(Issue::from).ok_or_else(|| {
        Error::RemoteProtocol("issue creation succeeded but returned no issue".to_string())
    })
}

/// Decodes `IssueLabelCreate`, returning the created label.
///
/// # Errors
///
/// See [`created_issue`].
pub fn created_label(envelope: Value) -> Result<Label> {
    let data: LabelCreateData = data(envelope)?;
    ensure_success("label creation", data.issue_label_create.success)?;
    data.issue_label_create.issue_label.map(Label::from).ok_or_else(|| {
        Error::RemoteProtocol("label creation succeeded but returned no label".to_string())
    })
}

/// Decodes a mutation that reports only `{ success }` under `field`.
///
/// # Errors
///
/// See [`data`]; [`Error::OperationRejected`] when `success` is false or
/// the payload is null.
pub fn mutation_success(envelope: Value, field: &str, action: &'static str) -> Result<()> {
    let mut data: serde_json::Map<String, Value> = data(envelope)?;
    let payload = match data.remove(field) {
        None | Some(Value::Null) => SuccessPayload { success: false },
        Some(value) => serde_json::from_value(value)
            .map_err(|e| Error::RemoteProtocol(format!("unexpected {field} payload: {e}")))?,
    };
    ensure_success(action, payload.success)
}

/// Maps search hits to resolver candidates.
#[must_use]
pub fn team_candidates(teams: Vec<Team>) -> Vec<Candidate> {
    teams.into_iter().map(|t| Candidate::new(t.id, t.name)).collect()
}

/// Maps search hits to resolver candidates.
#[must_use]
pub fn issue_candidates(issues: Vec<Issue>) -> Vec<Candidate> {
    issues.into_iter().map(|i| Candidate::new(i.id, i.title)).collect()
}

/// Maps search hits to resolver candidates.
#[must_use]
pub fn label_candidates(labels: Vec<Label>) -> Vec<Candidate> {
    labels.into_iter().map(|l| Candidate::new(l.id, l.name)).collect()
}
