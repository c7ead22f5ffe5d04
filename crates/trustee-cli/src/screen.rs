//! Screen and scrollback wiping.
//!
//! Some terminals ignore the scrollback purge; the visible screen is still
//! cleared there.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

/// Clear the visible screen and the scrollback, then home the cursor.
pub fn wipe<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), Clear(ClearType::Purge), MoveTo(0, 0))
}
