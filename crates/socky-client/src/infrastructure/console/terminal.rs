//! Console backed by a terminal in raw mode.
//!
//! In raw mode the terminal no longer turns `\n` into "new line + carriage
//! return", so every line break written here is `\r\n`.  Full-screen draws
//! move the cursor home and clear the screen first (crossterm commands), then
//! print the board top to bottom.

use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use tracing::debug;

use crate::application::shell::Console;

/// Writes console output to any `Write` target (stdout in production).
pub struct TerminalConsole<W: Write + Send = Stdout> {
    out: Mutex<W>,
}

impl TerminalConsole<Stdout> {
    /// A console writing to the process's stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalConsole<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consumes the console and returns the writer.
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_lines<'a>(
        out: &mut W,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> io::Result<()> {
        for line in lines {
            for part in line.split('\n') {
                out.write_all(part.trim_end_matches('\r').as_bytes())?;
                out.write_all(b"\r\n")?;
            }
        }
        out.flush()
    }
}

impl<W: Write + Send> Console for TerminalConsole<W> {
    fn log(&self, line: &str) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        if let Err(e) = Self::write_lines(&mut *out, [line]) {
            debug!("console write failed: {e}");
        }
    }

    fn draw(&self, lines: &[String]) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        let result = queue!(&mut *out, MoveTo(0, 0), Clear(ClearType::All))
            .and_then(|()| Self::write_lines(&mut *out, lines.iter().map(String::as_str)));
        if let Err(e) = result {
            debug!("console draw failed: {e}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
