//! Reveal sessions for Secret Santa Trustee.
//!
//! A [`RevealSession`] lets each participant look up their own recipient
//! exactly once (unless repeats are allowed), [`ClearMode`] decides how the
//! screen is handed over to the next person, and [`SessionArtifact`] keeps
//! the session's transient file alive only for as long as it is needed.

pub mod artifact;
pub mod clear;
pub mod config;
pub mod error;
pub mod session;

pub use artifact::{ArtifactDocument, SessionArtifact};
pub use clear::{ClearMode, HoldOutcome};
pub use config::RevealConfig;
pub use error::{ConfigError, ConfigResult, RevealError, RevealResult};
pub use session::{Reveal, RevealSession, SessionState, Submission};
