//! Name resolution: maps a human-supplied name to the one remote ID it denotes.
//!
//! Lookups themselves are filtered search queries issued by the client;
//! this module only applies the uniqueness rules to what came back.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How many candidate names an ambiguity error lists before truncating.
const MAX_LISTED_CANDIDATES: usize = 5;

/// Kinds of entity that can be looked up by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A team, matched by name substring.
    Team,
    /// An issue, matched by title substring.
    Issue,
    /// A label, matched by exact name.
    Label,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Team => "team",
            Self::Issue => "issue",
            Self::Label => "label",
        };
        f.write_str(s)
    }
}

/// A search hit: the ID plus the name it was matched on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Opaque identifier.
    pub id: String,
    /// Name or title, used only in error messages.
    pub name: String,
}

impl Candidate {
    /// Creates a candidate.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

/// Returns the ID of the single candidate.
///
/// # Errors
///
/// [`Error::NotFound`] when there are no candidates, [`Error::AmbiguousMatch`]
/// when there is more than one.
pub fn unique(kind: EntityKind, query: &str, candidates: Vec<Candidate>) -> Result<String> {
    at_most_one(kind, query, candidates)?
        .ok_or_else(|| Error::NotFound { kind, query: query.to_string() })
}

/// Like [`unique`], but zero candidates is `Ok(None)` rather than an error.
///
/// # Errors
///
/// [`Error::AmbiguousMatch`] when there is more than one candidate.
pub fn at_most_one(
    kind: EntityKind,
    query: &str,
    mut candidates: Vec<Candidate>,
) -> Result<Option<String>> {
    match candidates.len() {
        0 => Ok(None),
        1 => Ok(candidates.pop().map(|c| c.id)),
        count => Err(Error::AmbiguousMatch {
            kind,
            query: query.to_string(),
            count,
            candidates: list_names(&candidates),
        }),
    }
}

fn list_names(candidates: &[Candidate]) -> String {
    let mut names: Vec<&str> =
        candidates.iter().take(MAX_LISTED_CANDIDATES).map(|c| c.name.as_str()).collect();
    if candidates.len() > MAX_LISTED_CANDIDATES {
        names.push("...");
    }
    names.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(n: usize) -> Vec<Candidate> {
        (0..n).map(|i| Candidate::new(format!("id-{i}"), format!("Name {i}"))).collect()
    }

    #[test]
    fn unique_by_match_count() {
        // (match count, expected outcome)
        let cases: [(usize, &str); 4] =
            [(0, "not_found"), (1, "id-0"), (2, "ambiguous"), (5, "ambiguous")];

        for (count, expected) in cases {
            let result = unique(EntityKind::Team, "eng", candidates(count));
            match (expected, result) {
                ("not_found", Err(Error::NotFound { kind, query })) => {
                    assert_eq!(kind, EntityKind::Team);
                    assert_eq!(query, "eng");
                }
                ("ambiguous", Err(Error::AmbiguousMatch { count: reported, .. })) => {
                    assert_eq!(reported, count);
                }
                (id, Ok(found)) => assert_eq!(found, id),
                (expected, other) => panic!("count {count}: expected {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn at_most_one_treats_empty_as_none() {
        assert_eq!(at_most_one(EntityKind::Label, "bug", vec![]).unwrap(), None);
        assert_eq!(
            at_most_one(EntityKind::Label, "bug", candidates(1)).unwrap(),
            Some("id-0".to_string())
        );
        assert!(matches!(
            at_most_one(EntityKind::Label, "bug", candidates(2)),
            Err(Error::AmbiguousMatch { .. })
        ));
    }

    #[test]
    fn ambiguity_lists_at_most_five_names() {
        let Err(Error::AmbiguousMatch { candidates: listed, count, .. }) =
            unique(EntityKind::Issue, "fix", candidates(7))
        else {
            panic!("expected ambiguity");
        };
        assert_eq!(count, 7);
        assert!(listed.contains("Name 4"));
        assert!(!listed.contains("Name 5"));
        assert!(listed.ends_with("..."));
    }
}
