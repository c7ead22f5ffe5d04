//! Configuration for a reveal session.

use std::path::{Path, PathBuf};

use crate::clear::ClearMode;

/// Configuration for a reveal session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealConfig {
    /// How the screen is cleared after each reveal.
    pub mode: ClearMode,
    /// Let participants look themselves up more than once.
    pub allow_repeat: bool,
    /// RNG seed for reproducible assignments.
    pub seed: Option<u64>,
    /// Directory for the session file (system temp dir when unset).
    pub state_dir: Option<PathBuf>,
}

impl RevealConfig {
    /// Set the clear mode.
    pub fn with_mode(mut self, mode: ClearMode) -> Self {
        self.mode = mode;
        self
    }

    /// Allow or forbid repeat reveals.
    pub fn with_allow_repeat(mut self, allow_repeat: bool) -> Self {
        self.allow_repeat = allow_repeat;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set the directory for the session file.
    pub fn with_state_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.state_dir = dir;
        self
    }

    /// Directory for the session file, if one was chosen.
    pub fn state_dir(&self) -> Option<&Path> {
        self.state_dir.as_deref()
    }

    /// Whether each participant may reveal only once.
    pub fn one_shot(&self) -> bool {
        !self.allow_repeat
    }
}
