//! Giver to recipient mapping produced by the derangement engine.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::roster::Roster;

/// A derangement over a roster: participant `i` gifts to
/// `recipients[i]`, and `recipients[i] != i` for every `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    roster: Roster,
    recipients: Vec<usize>,
}

impl Assignment {
    /// Wrap an already verified derangement.
    pub(crate) fn from_parts(roster: Roster, recipients: Vec<usize>) -> Self {
        debug_assert!(crate::derange::is_derangement(&recipients));
        debug_assert_eq!(roster.len(), recipients.len());
        Self { roster, recipients }
    }

    /// The participants this assignment covers.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Recipient index for each giver index.
    pub fn recipients(&self) -> &[usize] {
        &self.recipients
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    /// Always false for an assignment built by the engine.
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    /// Recipient index for the giver at `giver`.
    pub fn recipient_index(&self, giver: usize) -> CoreResult<usize> {
        self.recipients
            .get(giver)
            .copied()
            .ok_or(CoreError::UnknownParticipant(giver))
    }

    /// Recipient display name for the giver at `giver`.
    pub fn recipient_of(&self, giver: usize) -> CoreResult<&str> {
        self.roster.name(self.recipient_index(giver)?)
    }

    /// Iterate `(giver, recipient)` display-name pairs in roster order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        let names = self.roster.names();
        self.recipients
            .iter()
            .enumerate()
            .map(move |(giver, &to)| (names[giver].as_str(), names[to].as_str()))
    }
}
