//! Hand-over policy between two reveals.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// What happens between showing a recipient and wiping the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearMode {
    /// Wait for the participant to press Enter.
    #[default]
    Manual,
    /// Wait a fixed delay, then clear on its own.
    Timeout(Duration),
    /// Clear straight away.
    Instant,
}

/// Result of [`ClearMode::hold`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// The screen may be cleared now.
    Proceed,
    /// Input ended while waiting for the acknowledgement.
    Terminated,
}

impl ClearMode {
    /// Resolve the `--timeout` and `--no-enter` flags.
    ///
    /// A zero timeout means the same as `--no-enter`.
    pub fn from_flags(timeout: Option<i64>, no_enter: bool) -> ConfigResult<Self> {
        match (timeout, no_enter) {
            (Some(secs), _) if secs < 0 => Err(ConfigError::NegativeTimeout(secs)),
            (Some(secs), true) if secs > 0 => Err(ConfigError::ConflictingClearModes(secs)),
            (_, true) | (Some(0), false) => Ok(Self::Instant),
            (Some(secs), false) => Ok(Self::Timeout(Duration::from_secs(secs.unsigned_abs()))),
            (None, false) => Ok(Self::Manual),
        }
    }

    /// Resolve an answer from the configuration menu.
    ///
    /// Blank or `0` selects manual mode, a positive number of seconds
    /// selects timeout mode.
    pub fn from_menu_answer(answer: &str) -> ConfigResult<Self> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(Self::Manual);
        }
        let secs: i64 = answer
            .parse()
            .map_err(|_| ConfigError::InvalidChoice(answer.to_string()))?;
        match secs {
            0 => Ok(Self::Manual),
            s if s < 0 => Err(ConfigError::NegativeTimeout(s)),
            s => Ok(Self::Timeout(Duration::from_secs(s.unsigned_abs()))),
        }
    }

    /// The note shown under a reveal.
    pub fn handoff_message(&self) -> String {
        match self {
            Self::Manual => "(Press Enter to clear, and pass to next person)".to_string(),
            Self::Timeout(delay) => format!(
                "(This message will be automatically cleared in {}. \
                 Please pass the device to the next person afterward.)",
                format_delay(*delay)
            ),
            Self::Instant => {
                "(Clearing now. Please pass the device to the next person.)".to_string()
            }
        }
    }

    /// Print the hand-off note and block until the screen may be cleared.
    ///
    /// Manual mode reads one line from `input`; end of input yields
    /// [`HoldOutcome::Terminated`]. Timeout mode sleeps for the full delay
    /// and reads nothing, so input typed meanwhile waits for the next
    /// prompt.
    pub fn hold<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> io::Result<HoldOutcome> {
        writeln!(out, "\n{}", self.handoff_message())?;
        out.flush()?;

        match self {
            Self::Manual => {
                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    return Ok(HoldOutcome::Terminated);
                }
            }
            Self::Timeout(delay) => {
                debug!(delay_ms = delay.as_millis() as u64, "holding reveal");
                thread::sleep(*delay);
            }
            Self::Instant => {}
        }
        Ok(HoldOutcome::Proceed)
    }
}

impl fmt::Display for ClearMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "Manual (Press Enter)"),
            Self::Timeout(delay) => write!(f, "Auto (Clear after {})", format_delay(*delay)),
            Self::Instant => write!(f, "Instant"),
        }
    }
}

fn format_delay(delay: Duration) -> String {
    if delay.subsec_nanos() != 0 {
        return format!("{} ms", delay.as_millis());
    }
    match delay.as_secs() {
        1 => "1 second".to_string(),
        n => format!("{n} seconds"),
    }
}
