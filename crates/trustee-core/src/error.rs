//! Error types for roster validation and derangement.

use thiserror::Error;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised before or during assignment generation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Fewer than two participants were given.
    #[error("need at least 2 distinct participants, got {count}")]
    TooFewParticipants {
        /// Number of participants supplied.
        count: usize,
    },

    /// Two names collide under case-insensitive comparison.
    #[error("duplicate participant name: \"{second}\" clashes with \"{first}\"")]
    DuplicateName {
        /// The name that was entered first.
        first: String,
        /// The later name that collides with it.
        second: String,
    },

    /// No derangement was found and the rotation fallback was disabled.
    #[error("could not build a derangement after {attempts} attempts")]
    DerangementImpossible {
        /// Number of rounds that were tried.
        attempts: u32,
    },

    /// A participant index outside the roster.
    #[error("unknown participant index {0}")]
    UnknownParticipant(usize),
}
