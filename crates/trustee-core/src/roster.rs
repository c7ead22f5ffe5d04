//! The validated participant list.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// An ordered list of at least two participants with case-insensitively
/// distinct names.
///
/// Display names keep the casing they were entered with; only lookups and
/// the uniqueness check ignore case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Build a roster, trimming each name and skipping blank ones.
    ///
    /// Fails with [`CoreError::TooFewParticipants`] for fewer than two names
    /// and [`CoreError::DuplicateName`] when two names differ only by case.
    pub fn new<I, S>(names: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        let mut seen: HashMap<String, usize> = HashMap::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            if let Some(&first) = seen.get(&fold(name)) {
                return Err(CoreError::DuplicateName {
                    first: names[first].clone(),
                    second: name.clone(),
                });
            }
            seen.insert(fold(name), idx);
        }

        if names.len() < 2 {
            return Err(CoreError::TooFewParticipants { count: names.len() });
        }

        Ok(Self { names })
    }

    /// Parse a comma-separated line such as `"Alice, Bob, Carol"`.
    pub fn parse_list(line: &str) -> CoreResult<Self> {
        Self::new(line.split(','))
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a validated roster.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All display names in entry order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Display name at `idx`.
    pub fn name(&self, idx: usize) -> CoreResult<&str> {
        self.names
            .get(idx)
            .map(String::as_str)
            .ok_or(CoreError::UnknownParticipant(idx))
    }

    /// Find a participant by name, ignoring case and surrounding whitespace.
    pub fn find(&self, query: &str) -> Option<usize> {
        let key = fold(query.trim());
        self.names.iter().position(|n| fold(n) == key)
    }
}

impl TryFrom<Vec<String>> for Roster {
    type Error = CoreError;

    fn try_from(names: Vec<String>) -> CoreResult<Self> {
        Self::new(names)
    }
}

impl From<Roster> for Vec<String> {
    fn from(roster: Roster) -> Self {
        roster.names
    }
}

/// Case-insensitive comparison key.
fn fold(name: &str) -> String {
    name.to_lowercase()
}
