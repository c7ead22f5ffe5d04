//! Core types for Secret Santa Trustee.
//!
//! A [`Roster`] holds the validated participant names, and the derangement
//! engine turns it into an [`Assignment`] in which nobody gifts to
//! themself. The engine draws all randomness from a caller-supplied
//! generator, so a seeded generator gives reproducible assignments.

pub mod assignment;
pub mod derange;
pub mod error;
pub mod roster;

pub use assignment::Assignment;
pub use derange::{
    DerangeOptions, MAX_ATTEMPTS, Strategy, derange, derange_with, is_derangement, session_rng,
};
pub use error::{CoreError, CoreResult};
pub use roster::Roster;
