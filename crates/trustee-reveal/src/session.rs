//! The reveal session state machine.
//!
//! A session walks `Idle -> Revealing -> Clearing -> Idle` once per
//! successful lookup and ends in `Terminated`. Failed lookups leave it in
//! `Idle`. Only the looked-up participant's recipient ever leaves this
//! module.

use std::fmt;

use tracing::{debug, info};

use trustee_core::Assignment;

use crate::error::{RevealError, RevealResult};

/// Words that end the session when no participant carries that name.
const QUIT_WORDS: [&str; 2] = ["quit", "exit"];

/// Where a session is in its reveal cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for a name.
    Idle,
    /// A recipient is on screen.
    Revealing,
    /// The screen is being wiped.
    Clearing,
    /// The session is over.
    Terminated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Revealing => write!(f, "revealing"),
            Self::Clearing => write!(f, "clearing"),
            Self::Terminated => write!(f, "terminated"),
        }
    }
}

/// One participant's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    /// Roster index of the participant who asked.
    pub giver_index: usize,
    /// Display name of the participant who asked.
    pub giver: String,
    /// Display name of the person they gift to.
    pub recipient: String,
}

/// What a line typed at the name prompt led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// A participant's recipient, to be shown to them alone.
    Reveal(Reveal),
    /// The operator ended the session.
    Quit,
}

/// An interactive reveal session over a fixed assignment.
pub struct RevealSession {
    assignment: Assignment,
    viewed: Vec<bool>,
    allow_repeat: bool,
    state: SessionState,
}

impl RevealSession {
    /// Start a session; nobody has viewed yet.
    pub fn new(assignment: Assignment, allow_repeat: bool) -> Self {
        let viewed = vec![false; assignment.len()];
        Self {
            assignment,
            viewed,
            allow_repeat,
            state: SessionState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The assignment this session reveals from.
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Per-participant "already revealed" flags, in roster order.
    pub fn viewed(&self) -> &[bool] {
        &self.viewed
    }

    /// Number of participants who have not revealed yet.
    pub fn remaining(&self) -> usize {
        self.viewed.iter().filter(|v| !**v).count()
    }

    /// Handle a line typed at the name prompt.
    ///
    /// Recoverable failures ([`RevealError::EmptyName`],
    /// [`RevealError::LookupMiss`], [`RevealError::AlreadyViewed`]) leave
    /// the session in `Idle`.
    pub fn submit(&mut self, input: &str) -> RevealResult<Submission> {
        self.expect_state(SessionState::Idle, "look up a name")?;

        let query = input.trim();
        if query.is_empty() {
            return Err(RevealError::EmptyName);
        }

        let Some(giver_index) = self.assignment.roster().find(query) else {
            if QUIT_WORDS.iter().any(|w| query.eq_ignore_ascii_case(w)) {
                self.terminate();
                return Ok(Submission::Quit);
            }
            debug!("lookup missed");
            return Err(RevealError::LookupMiss);
        };

        if !self.allow_repeat && self.viewed[giver_index] {
            debug!(giver_index, "repeat reveal refused");
            return Err(RevealError::AlreadyViewed);
        }

        let giver = self.assignment.roster().name(giver_index)?.to_string();
        let recipient = self.assignment.recipient_of(giver_index)?.to_string();
        self.viewed[giver_index] = true;
        self.state = SessionState::Revealing;
        info!(giver_index, remaining = self.remaining(), "revealed");

        Ok(Submission::Reveal(Reveal {
            giver_index,
            giver,
            recipient,
        }))
    }

    /// Move from `Revealing` to `Clearing`.
    pub fn begin_clear(&mut self) -> RevealResult<()> {
        self.expect_state(SessionState::Revealing, "start clearing")?;
        self.state = SessionState::Clearing;
        Ok(())
    }

    /// Move from `Clearing` back to `Idle`.
    pub fn finish_clear(&mut self) -> RevealResult<()> {
        self.expect_state(SessionState::Clearing, "finish clearing")?;
        self.state = SessionState::Idle;
        Ok(())
    }

    /// End the session from any state.
    pub fn terminate(&mut self) {
        if self.state != SessionState::Terminated {
            info!(remaining = self.remaining(), "session terminated");
        }
        self.state = SessionState::Terminated;
    }

    fn expect_state(&self, expected: SessionState, action: &'static str) -> RevealResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(RevealError::InvalidTransition {
                from: self.state,
                action,
            })
        }
    }
}
