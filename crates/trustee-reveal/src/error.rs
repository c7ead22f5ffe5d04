//! Error types for reveal configuration and sessions.

use thiserror::Error;

use crate::session::SessionState;

/// Result type for configuration parsing.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for session operations.
pub type RevealResult<T> = Result<T, RevealError>;

/// Bad flag or menu values, reported before a session starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A timeout below zero seconds.
    #[error("timeout must be 0 or a positive number of seconds, got {0}")]
    NegativeTimeout(i64),

    /// `--no-enter` combined with a non-zero `--timeout`.
    #[error("--no-enter clears immediately and cannot be combined with --timeout {0}")]
    ConflictingClearModes(i64),

    /// A menu answer that is not a number.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),
}

/// Errors that can occur while a session is running.
///
/// None of the variants carry a recipient name.
#[derive(Debug, Error)]
pub enum RevealError {
    /// Blank input at the name prompt.
    #[error("Please enter a non-empty name.")]
    EmptyName,

    /// The typed name matches no participant.
    #[error("Name not found. Please re-check spelling and try again.")]
    LookupMiss,

    /// The participant already used their one reveal.
    #[error("You have already viewed your assignment.")]
    AlreadyViewed,

    /// An operation that is not valid in the current state.
    #[error("cannot {action} while {from}")]
    InvalidTransition {
        /// State the session was in.
        from: SessionState,
        /// The attempted operation.
        action: &'static str,
    },

    /// Creating, writing, or removing the session file failed.
    #[error("session file error: {0}")]
    Storage(#[from] std::io::Error),

    /// Encoding the session file failed.
    #[error("session file encoding error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Core lookup error.
    #[error("{0}")]
    Core(#[from] trustee_core::CoreError),
}

impl RevealError {
    /// Whether the participant can simply try again at the name prompt.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmptyName | Self::LookupMiss | Self::AlreadyViewed)
    }
}
