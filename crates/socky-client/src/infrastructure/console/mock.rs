//! Recording console for unit testing.
//!
//! Every logged line and every drawn screen is kept in a `Mutex<Vec<...>>`
//! so tests can check exactly what the user would have seen, in order.

use std::sync::Mutex;

use crate::application::shell::Console;

/// A console that records output instead of printing it.
#[derive(Debug, Default)]
pub struct RecordingConsole {
    /// Lines passed to `log`.
    pub logged: Mutex<Vec<String>>,
    /// Screens passed to `draw`.
    pub drawn: Mutex<Vec<Vec<String>>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the logged lines.
    pub fn lines(&self) -> Vec<String> {
        self.logged.lock().unwrap().clone()
    }

    /// Snapshot of the drawn screens.
    pub fn draws(&self) -> Vec<Vec<String>> {
        self.drawn.lock().unwrap().clone()
    }
}

impl Console for RecordingConsole {
    fn log(&self, line: &str) {
        self.logged.lock().unwrap().push(line.to_string());
    }

    fn draw(&self, lines: &[String]) {
        self.drawn.lock().unwrap().push(lines.to_vec());
    }
}
