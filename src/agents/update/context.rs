use crate::error::{BumpError, Result};
use std::collections::HashMap;
use std::fmt;

/// Printed for collections whose pinned version was already the latest
pub const NONE_SENTINEL: &str = "NONE";

/// Result of resolving one collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionOutcome {
    /// The pin moved from `old` (absent when unpinned) to `new`
    Updated { old: Option<String>, new: String },
    /// The pinned version is already the latest
    Unchanged,
}

impl fmt::Display for VersionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionOutcome::Updated { new, .. } => f.write_str(new),
            VersionOutcome::Unchanged => f.write_str(NONE_SENTINEL),
        }
    }
}

/// Tracks the resolved version of every collection seen during a run
#[derive(Debug, Clone, Default)]
pub struct ResolvedVersions {
    outcomes: HashMap<String, VersionOutcome>,
    /// Names of updated collections in the order they were resolved
    updated: Vec<String>,
    /// Set once any entry was rewritten; a later duplicate never clears it
    changed: bool,
}

impl ResolvedVersions {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an updated pin; a repeated name replaces the earlier outcome
    pub fn record_update(&mut self, name: String, old: Option<String>, new: String) {
        self.updated.retain(|n| n != &name);
        self.updated.push(name.clone());
        self.changed = true;
        self.outcomes
            .insert(name, VersionOutcome::Updated { old, new });
    }

    /// Record a collection whose pin is already current
    pub fn record_unchanged(&mut self, name: String) {
        self.updated.retain(|n| n != &name);
        self.outcomes.insert(name, VersionOutcome::Unchanged);
    }

    pub fn get(&self, name: &str) -> Option<&VersionOutcome> {
        self.outcomes.get(name)
    }

    /// Check whether any pin changed during the run
    pub fn has_changes(&self) -> bool {
        self.changed
    }

    pub fn total_updates(&self) -> usize {
        self.updated.len()
    }

    /// Updated collections as `(name, old, new)` in resolution order
    pub fn updates(&self) -> impl Iterator<Item = (&str, Option<&str>, &str)> {
        self.updated.iter().filter_map(|name| match self.outcomes.get(name) {
            Some(VersionOutcome::Updated { old, new }) => {
                Some((name.as_str(), old.as_deref(), new.as_str()))
            }
            _ => None,
        })
    }

    /// Render the printed value for each requested name, in request order.
    ///
    /// Fails on the first name that was never resolved, before anything is
    /// rendered for the names after it.
    pub fn render(&self, names: &[String]) -> Result<Vec<String>> {
        names
            .iter()
            .map(|name| {
                self.get(name)
                    .map(|outcome| outcome.to_string())
                    .ok_or_else(|| BumpError::Lookup(name.clone()))
            })
            .collect()
    }
}
