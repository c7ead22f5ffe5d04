//! CLI frontend for Secret Santa Trustee.

mod logging;
mod prompt;
mod reveal;
mod screen;
mod signals;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use colored::Colorize;
use tracing::info;

use trustee_core::{Roster, derange, session_rng};
use trustee_reveal::{ClearMode, RevealConfig, RevealResult, RevealSession, SessionArtifact};

#[derive(Parser)]
#[command(
    name = "trustee",
    about = "Secret Santa Trustee: private, one-at-a-time gift assignment reveals",
    version
)]
struct Cli {
    /// Participant names (prompted for when omitted)
    names: Vec<String>,

    /// Clear automatically after this many seconds instead of waiting for Enter
    #[arg(long, value_name = "SECONDS", allow_negative_numbers = true)]
    timeout: Option<i64>,

    /// Clear immediately after each reveal (same as --timeout 0)
    #[arg(long)]
    no_enter: bool,

    /// Let participants view their assignment more than once
    #[arg(long)]
    allow_repeat: bool,

    /// RNG seed for reproducible assignments
    #[arg(long)]
    seed: Option<u64>,

    /// Choose the clear mode from an interactive menu
    #[arg(long, conflicts_with_all = ["timeout", "no_enter"])]
    menu: bool,

    /// Directory for the temporary session file (default: system temp dir)
    #[arg(long, value_name = "DIR")]
    state_dir: Option<PathBuf>,
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let signals = signals::install()?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let mode = if cli.menu {
        prompt::configuration_menu(&mut input, &mut out)?
    } else {
        ClearMode::from_flags(cli.timeout, cli.no_enter).map_err(|e| e.to_string())?
    };
    let config = RevealConfig::default()
        .with_mode(mode)
        .with_allow_repeat(cli.allow_repeat)
        .with_seed(cli.seed)
        .with_state_dir(cli.state_dir);

    let roster = if cli.names.is_empty() {
        screen::wipe(&mut out).map_err(|e| e.to_string())?;
        writeln!(out, "{}", "Secret Santa Trustee".bold()).map_err(|e| e.to_string())?;
        prompt::read_roster(&mut input, &mut out)?
    } else {
        Roster::new(&cli.names).map_err(|e| e.to_string())?
    };

    let assignment =
        derange(&roster, &mut session_rng(config.seed)).map_err(|e| e.to_string())?;
    info!(
        participants = roster.len(),
        seeded = config.seed.is_some(),
        mode = %config.mode,
        one_shot = config.one_shot(),
        "assignments generated"
    );

    let mut session = RevealSession::new(assignment, config.allow_repeat);
    let mut artifact = SessionArtifact::create(config.state_dir(), &session)
        .map_err(|e| format!("cannot create temporary session file: {e}"))?;
    signals.watch(artifact.path());

    let result = reveal::run(&mut session, &mut artifact, config.mode, &mut input, &mut out);

    let path = artifact.path().to_path_buf();
    let closed = artifact.close();
    report_cleanup(closed, &path, &mut out, &mut io::stderr()).map_err(|e| e.to_string())?;

    result
}

/// Tell the organizer whether the session file is gone. Failures are reported
/// once, on `err`.
fn report_cleanup<W: Write, E: Write>(
    closed: RevealResult<()>,
    path: &Path,
    out: &mut W,
    err: &mut E,
) -> io::Result<()> {
    match closed {
        Ok(()) => writeln!(out, "Temporary file cleaned up. Happy holidays!"),
        Err(e) => writeln!(
            err,
            "{} could not remove temporary file {}: {e}",
            "warning:".yellow(),
            path.display()
        ),
    }
}
