//! Organizer prompts: participant entry and the configuration menu.

use std::io::{self, BufRead, Write};

use trustee_core::Roster;
use trustee_reveal::{ClearMode, ConfigError};

/// Ask for a comma-separated list of names.
pub fn read_roster<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Roster, String> {
    write!(out, "Enter all participant names, comma-separated (at least 2):\n> ")
        .and_then(|()| out.flush())
        .map_err(|e| e.to_string())?;

    let mut line = String::new();
    if input.read_line(&mut line).map_err(|e| e.to_string())? == 0 {
        return Err("no participant names entered".into());
    }
    Roster::parse_list(&line).map_err(|e| e.to_string())
}

/// Ask how the screen should be cleared after each reveal.
///
/// Re-asks on invalid answers; end of input is an error.
pub fn configuration_menu<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<ClearMode, String> {
    write_menu_header(out).map_err(|e| e.to_string())?;

    let mut line = String::new();
    let mode = loop {
        write!(out, "Enter timeout value (0 for manual) [default: 0]: ")
            .and_then(|()| out.flush())
            .map_err(|e| e.to_string())?;

        line.clear();
        if input.read_line(&mut line).map_err(|e| e.to_string())? == 0 {
            return Err("configuration aborted".into());
        }
        match ClearMode::from_menu_answer(&line) {
            Ok(mode) => break mode,
            Err(e) => writeln!(out, "{}", menu_hint(&e)).map_err(|e| e.to_string())?,
        }
    };

    write_menu_footer(out, mode).map_err(|e| e.to_string())?;
    Ok(mode)
}

fn menu_hint(error: &ConfigError) -> String {
    match error {
        ConfigError::NegativeTimeout(_) => "Please enter 0 or a positive integer.".into(),
        other => format!("{other}. Please enter 0 or a positive integer."),
    }
}

fn write_menu_header<W: Write>(out: &mut W) -> io::Result<()> {
    let rule = "=".repeat(60);
    writeln!(out, "{rule}")?;
    writeln!(out, "Secret Santa Trustee - Configuration Settings")?;
    writeln!(out, "{rule}\n")?;
    writeln!(out, "Screen clearing after viewing results:")?;
    writeln!(out, "  Enter 0: Manual mode - Press Enter to clear screen")?;
    writeln!(out, "  Enter N (positive integer): Auto mode - Clear after N seconds\n")
}

fn write_menu_footer<W: Write>(out: &mut W, mode: ClearMode) -> io::Result<()> {
    let rule = "=".repeat(60);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "Configuration complete!")?;
    writeln!(out, "  - Screen clearing: {mode}")?;
    writeln!(out, "{rule}\n")
}
