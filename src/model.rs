//! Entity records decoded from Linear responses.
//!
//! These are read-only projections of remote state. Identifiers are opaque
//! strings issued by Linear and are never parsed or generated here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A Linear team and, when requested, its issues.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Opaque team identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Issues in response order. Empty unless the query selected them.
    pub issues: Vec<Issue>,
}

/// A single issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Opaque issue identifier.
    pub id: String,
    /// Issue title.
    pub title: String,
    /// Markdown description; empty when the issue has none.
    pub description: String,
    /// Assigned user; both fields empty when unassigned.
    pub assignee: Assignee,
    /// Priority, 0 (none) through 4.
    pub priority: Priority,
    /// Workflow-state identifier; empty when not selected.
    pub status: String,
    /// Workflow-state display name, for output only.
    pub status_name: String,
    /// Labels applied to the issue.
    pub labels: Vec<Label>,
}

impl Issue {
    /// Returns `true` if someone is assigned.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        !self.assignee.name.is_empty()
    }
}

/// User an issue is assigned to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    /// Opaque user identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// An issue label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Opaque label identifier.
    pub id: String,
    /// Label name. Unique per workspace, case-insensitively.
    pub name: String,
}

/// Issue priority in the range 0..=4.
///
/// 0 means "no priority"; what 1 through 4 mean is decided by Linear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// No priority set.
    pub const NONE: Self = Self(0);
    /// Highest accepted value.
    pub const MAX: u8 = 4;

    /// Creates a priority, rejecting values outside 0..=4.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when `value` is out of range.
    pub fn new(value: i64) -> Result<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or_else(|| {
                Error::Validation(format!("priority must be an integer from 0 to 4, got {value}"))
            })
    }

    /// The raw value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Priority {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> Self {
        p.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The single field changed by one issue update.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueChange {
    /// Assign to the user with this ID.
    Assignee(String),
    /// Replace the description.
    Description(String),
    /// Set the priority.
    Priority(Priority),
    /// Move to the workflow state with this ID.
    Status(String),
}

impl IssueChange {
    /// Short name used in log lines and rejection messages.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::Assignee(_) => "assignee",
            Self::Description(_) => "description",
            Self::Priority(_) => "priority",
            Self::Status(_) => "status",
        }
    }
}
