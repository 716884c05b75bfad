//! Mapping from human workflow-status names to Linear state identifiers.
//!
//! State IDs are per workspace, so the table comes from configuration.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Lower-cased status name to workflow-state ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTable {
    states: BTreeMap<String, String>,
}

impl StatusTable {
    /// Builds a table, lower-casing and trimming every name.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let states = entries
            .into_iter()
            .map(|(name, id)| (normalize(name.as_ref()), id.into()))
            .collect();
        Self { states }
    }

    /// Looks up the state ID for `name`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the known statuses when `name`
    /// is not in the table.
    pub fn resolve(&self, name: &str) -> Result<&str> {
        let key = normalize(name);
        if let Some(id) = self.states.get(&key) {
            return Ok(id);
        }
        let known = if self.states.is_empty() {
            "none configured; add a `statuses:` map to the config file".to_string()
        } else {
            self.names().collect::<Vec<_>>().join(", ")
        };
        Err(Error::Validation(format!("unknown status '{}' (known: {known})", name.trim())))
    }

    /// Known status names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    /// Returns `true` if no statuses are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
