//! Events consumed by the connection shell, and the connection state it
//! tracks.
//!
//! Every producer (the transport task, the keyboard task, the Ctrl+C
//! listener) turns what it observes into a [`ShellEvent`] and pushes it onto
//! the single event queue.  Only the event loop consumes the queue, so the
//! shell sees events strictly one at a time, in arrival order.

use std::fmt;

use socky_core::KeyName;

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// One local keydown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// DOM-style name of the key (what gets sent to the server).
    pub key: KeyName,
    /// Modifiers held at the time (logged, never sent).
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// A key press with no modifiers held.
    pub fn plain(key: KeyName) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    /// `true` for Ctrl+C, which always means "quit" in a raw-mode terminal.
    pub fn is_interrupt(&self) -> bool {
        self.modifiers.ctrl && matches!(self.key, KeyName::Character('c' | 'C'))
    }
}

impl fmt::Display for KeyPress {
    /// Formats as e.g. `keydown key="ArrowUp" ctrl=false alt=false shift=false meta=false`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "keydown key={:?} ctrl={} alt={} shift={} meta={}",
            self.key.to_string(),
            self.modifiers.ctrl,
            self.modifiers.alt,
            self.modifiers.shift,
            self.modifiers.meta
        )
    }
}

/// Everything the connection shell reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// The WebSocket handshake completed.
    Opened,
    /// One inbound text frame.
    Message(String),
    /// The transport reported an error (connect failure, read/write failure).
    Error(String),
    /// A local key was pressed.
    KeyDown(KeyPress),
    /// The transport is gone; no more events will come from it.
    Closed { code: Option<u16>, reason: String },
    /// The user asked to quit (Ctrl+C, SIGINT, or the configured quit key).
    Shutdown,
}

impl ShellEvent {
    /// Short variant name for debug logs (avoids dumping payloads).
    pub fn kind(&self) -> &'static str {
        match self {
            ShellEvent::Opened => "Opened",
            ShellEvent::Message(_) => "Message",
            ShellEvent::Error(_) => "Error",
            ShellEvent::KeyDown(_) => "KeyDown",
            ShellEvent::Closed { .. } => "Closed",
            ShellEvent::Shutdown => "Shutdown",
        }
    }
}

/// Lifecycle of the single connection.
///
/// ```text
/// Connecting ──Opened──▶ Open ──shutdown()──▶ Closing ──Closed──▶ Closed
///      │                   │                                        ▲
///      └───────────────────┴──────────────Closed────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closing,
    Closed,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
