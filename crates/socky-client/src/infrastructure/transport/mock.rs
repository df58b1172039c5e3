//! Mock frame sink for unit testing.
//!
//! Records every frame the shell hands over instead of touching the network,
//! so tests can assert exactly what would have been sent and in what order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let sink = Arc::new(MockFrameSink::new());
//! let mut shell = ConnectionShell::new(endpoint, DisplayMode::Log, Arc::clone(&sink), console);
//!
//! shell.on_open();
//! shell.on_key_down(&KeyPress::plain(KeyName::Character('k'))).unwrap();
//!
//! assert_eq!(sink.frames(), vec!["k".to_string()]);
//! ```
//!
//! # `should_fail` flag
//!
//! Set `should_fail = true` to make every call return
//! [`SinkError::Disconnected`], as if the transport task had already ended.

use std::sync::Mutex;

use crate::application::shell::{FrameSink, SinkError};

/// A sink that records frames in memory.
#[derive(Debug, Default)]
pub struct MockFrameSink {
    /// Text frames passed to `send_text`, in call order.
    pub sent: Mutex<Vec<String>>,
    /// Number of `close` calls.
    pub closes: Mutex<usize>,
    /// When `true`, every method returns `SinkError::Disconnected`.
    pub should_fail: bool,
}

impl MockFrameSink {
    /// Creates an empty sink with `should_fail = false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the frames sent so far.
    pub fn frames(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    /// How many times `close` was called.
    pub fn close_count(&self) -> usize {
        *self.closes.lock().unwrap()
    }
}

impl FrameSink for MockFrameSink {
    fn send_text(&self, text: String) -> Result<(), SinkError> {
        if self.should_fail {
            return Err(SinkError::Disconnected);
        }
        self.sent.lock().unwrap().push(text);
        Ok(())
    }

    fn close(&self) -> Result<(), SinkError> {
        if self.should_fail {
            return Err(SinkError::Disconnected);
        }
        *self.closes.lock().unwrap() += 1;
        Ok(())
    }
}
