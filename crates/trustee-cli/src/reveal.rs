//! The interactive reveal loop.

use std::io::{BufRead, Write};

use colored::Colorize;
use tracing::warn;

use trustee_reveal::{ClearMode, HoldOutcome, Reveal, RevealSession, SessionArtifact, Submission};

use crate::screen;

/// Run name prompts until quit or end of input.
pub fn run<R: BufRead, W: Write>(
    session: &mut RevealSession,
    artifact: &mut SessionArtifact,
    mode: ClearMode,
    input: &mut R,
    out: &mut W,
) -> Result<(), String> {
    intro(out).map_err(|e| e.to_string())?;

    let mut line = String::new();
    loop {
        write!(out, "\nEnter your name: ")
            .and_then(|()| out.flush())
            .map_err(|e| e.to_string())?;

        line.clear();
        if input.read_line(&mut line).map_err(|e| e.to_string())? == 0 {
            writeln!(out, "\nEOF received. Exiting.").map_err(|e| e.to_string())?;
            session.terminate();
            return Ok(());
        }

        let reveal = match session.submit(&line) {
            Ok(Submission::Reveal(reveal)) => reveal,
            Ok(Submission::Quit) => {
                writeln!(out, "Exiting.").map_err(|e| e.to_string())?;
                return Ok(());
            }
            Err(e) if e.is_recoverable() => {
                writeln!(out, "{}", e.to_string().yellow()).map_err(|e| e.to_string())?;
                continue;
            }
            Err(e) => return Err(e.to_string()),
        };

        if let Err(e) = artifact.record(session) {
            warn!(error = %e, "could not update session file");
        }

        show(out, &reveal).map_err(|e| e.to_string())?;
        let outcome = mode.hold(input, out).map_err(|e| e.to_string())?;
        session.begin_clear().map_err(|e| e.to_string())?;
        screen::wipe(out).map_err(|e| e.to_string())?;
        session.finish_clear().map_err(|e| e.to_string())?;

        if outcome == HoldOutcome::Terminated {
            writeln!(out, "\nEOF received. Exiting.").map_err(|e| e.to_string())?;
            session.terminate();
            return Ok(());
        }
    }
}

fn intro<W: Write>(out: &mut W) -> std::io::Result<()> {
    screen::wipe(out)?;
    writeln!(out, "Assignments generated. Private reveal mode started.")?;
    writeln!(out, "Type your NAME to see whom you gift to (case-insensitive).")?;
    writeln!(out, "Type 'exit' or 'quit' to end (temporary file will be deleted).")
}

/// Wipe the screen and show one participant their recipient.
fn show<W: Write>(out: &mut W, reveal: &Reveal) -> std::io::Result<()> {
    screen::wipe(out)?;
    writeln!(out, "{}", format!("*** ONLY FOR {} ***", reveal.giver).bold())?;
    writeln!(out, "\nYou will gift to: {}", reveal.recipient.green().bold())
}
