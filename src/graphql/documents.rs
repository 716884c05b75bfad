//! Operation documents sent to the Linear API.
//!
//! Each selects exactly the fields the decoder reads.

pub(crate) const TEAMS: &str = r"
query Teams {
  teams {
    nodes {
      id
      name
    }
  }
}
";

pub(crate) const TEAM_ISSUES: &str = r"
query TeamIssues($teamId: String!) {
  team(id: $teamId) {
    id
    name
    issues {
      nodes {
        id
        title
        description
        priority
        assignee {
          id
          name
        }
        state {
          id
          name
        }
        labels {
          nodes {
            id
            name
          }
        }
      }
    }
  }
}
";

pub(crate) const FIND_TEAMS: &str = r"
query FindTeams($name: String!) {
  teams(filter: { name: { containsIgnoreCase: $name } }) {
    nodes {
      id
      name
    }
  }
}
";

pub(crate) const FIND_ISSUES: &str = r"
query FindIssues($title: String!) {
  issues(filter: { title: { containsIgnoreCase: $title } }) {
    nodes {
      id
      title
    }
  }
}
";

pub(crate) const FIND_TEAM_ISSUES: &str = r"
query FindTeamIssues($teamId: ID!, $title: String!) {
  issues(filter: { team: { id: { eq: $teamId } }, title: { containsIgnoreCase: $title } }) {
    nodes {
      id
      title
    }
  }
}
";

pub(crate) const ISSUE_CREATE: &str = r"
mutation IssueCreate($input: IssueCreateInput!) {
  issueCreate(input: $input) {
    success
    issue {
      id
      title
      description
    }
  }
}
";

pub(crate) const ISSUE_DELETE: &str = r"
mutation IssueDelete($id: String!) {
  issueDelete(id: $id) {
    success
  }
}
";

pub(crate) const ISSUE_UPDATE: &str = r"
mutation IssueUpdate($issueUpdateId: String!, $input: IssueUpdateInput!) {
  issueUpdate(id: $issueUpdateId, input: $input) {
    success
  }
}
";

pub(crate) const LABELS: &str = r"
query Labels {
  issueLabels {
    nodes {
      id
      name
    }
  }
}
";

pub(crate) const ISSUE_LABELS: &str = r"
query IssueLabels($id: String!) {
  issue(id: $id) {
    labels {
      nodes {
        id
        name
      }
    }
  }
}
";

pub(crate) const FIND_LABEL: &str = r"
query FindLabel($name: String!) {
  issueLabels(filter: { name: { eqIgnoreCase: $name } }) {
    nodes {
      id
      name
    }
  }
}
";

pub(crate) const LABEL_CREATE: &str = r"
mutation IssueLabelCreate($input: IssueLabelCreateInput!) {
  issueLabelCreate(input: $input) {
    success
    issueLabel {
      id
      name
    }
  }
}
";

pub(crate) const ISSUE_ADD_LABEL: &str = r"
mutation IssueAddLabel($issueId: String!, $labelId: String!) {
  issueAddLabel(id: $issueId, labelId: $labelId) {
    success
  }
}
";

pub(crate) const ISSUE_REMOVE_LABEL: &str = r"
mutation IssueRemoveLabel($issueId: String!, $labelId: String!) {
  issueRemoveLabel(id: $issueId, labelId: $labelId) {
    success
  }
}
";
