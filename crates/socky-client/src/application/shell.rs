//! ConnectionShell: reacts to connection and keyboard events.
//!
//! The shell owns the outbound half of the one connection (a [`FrameSink`])
//! and the [`Console`] it writes to.  It is driven one event at a time by the
//! event loop, so none of its methods ever run concurrently.
//!
//! # Handlers
//!
//! | Event        | Method            | Effect                                        |
//! |--------------|-------------------|-----------------------------------------------|
//! | `Opened`     | [`on_open`]       | log once, state → Open                        |
//! | `Message`    | [`on_message`]    | log raw text + `gridString` (or draw board)   |
//! | `Error`      | [`on_error`]      | log the error verbatim                        |
//! | `KeyDown`    | [`on_key_down`]   | log the key, send its name as one text frame  |
//! | `Closed`     | [`on_close`]      | log (if it ever opened), state → Closed, stop |
//! | `Shutdown`   | [`shutdown`]      | send a Close frame, state → Closing           |
//!
//! Key presses are the only source of data frames.
//!
//! [`on_open`]: ConnectionShell::on_open
//! [`on_message`]: ConnectionShell::on_message
//! [`on_error`]: ConnectionShell::on_error
//! [`on_key_down`]: ConnectionShell::on_key_down
//! [`on_close`]: ConnectionShell::on_close
//! [`shutdown`]: ConnectionShell::shutdown

use std::sync::Arc;

use socky_core::{BoardSnapshot, DecodeError, GridString, InboundMessage, KeyFrame, KeyName};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{ConnectionState, DisplayMode, Endpoint, KeyPress, ShellEvent};

/// Diagnostic line logged when the connection opens.
pub const OPEN_LINE: &str = "connected to server";

// ── Ports ─────────────────────────────────────────────────────────────────────

/// Error returned by a [`FrameSink`].
#[derive(Debug, Error, PartialEq)]
pub enum SinkError {
    /// The transport task has ended; nothing can be sent any more.
    #[error("transport is disconnected")]
    Disconnected,
}

/// Outbound half of the connection.
///
/// Both methods are fire-and-forget: they hand the frame to the transport and
/// return without waiting for it to reach the network.
pub trait FrameSink: Send + Sync {
    /// Queues one text frame.
    fn send_text(&self, text: String) -> Result<(), SinkError>;

    /// Queues a normal-closure Close frame.
    fn close(&self) -> Result<(), SinkError>;
}

/// Where the shell's human-readable output goes.
pub trait Console: Send + Sync {
    /// Appends one line.
    fn log(&self, line: &str);

    /// Clears the screen and draws `lines`.
    fn draw(&self, lines: &[String]);
}

impl<T: FrameSink + ?Sized> FrameSink for Arc<T> {
    fn send_text(&self, text: String) -> Result<(), SinkError> {
        (**self).send_text(text)
    }

    fn close(&self) -> Result<(), SinkError> {
        (**self).close()
    }
}

impl<T: Console + ?Sized> Console for Arc<T> {
    fn log(&self, line: &str) {
        (**self).log(line)
    }

    fn draw(&self, lines: &[String]) {
        (**self).draw(lines)
    }
}

// ── Error type ────────────────────────────────────────────────────────────────

/// Recoverable failures reported by the shell's handlers.
///
/// None of these end the session; the event loop logs them and moves on.
#[derive(Debug, Error)]
pub enum ShellError {
    /// A key was pressed before the handshake completed.
    #[error("connection is not open yet; key not sent")]
    NotOpen,

    /// A key was pressed after the connection started closing.
    #[error("connection is closed; key not sent")]
    Closed,

    /// An inbound payload was not valid JSON.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The transport refused the frame.
    #[error("send failed: {0}")]
    Sink(#[from] SinkError),
}

/// What the event loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

// ── Shell ─────────────────────────────────────────────────────────────────────

/// The explicitly owned connection object.
///
/// Created once per session by the infrastructure layer, then moved into the
/// event loop, which is its only user.
pub struct ConnectionShell<S: FrameSink, C: Console> {
    endpoint: Endpoint,
    display: DisplayMode,
    state: ConnectionState,
    sink: S,
    console: C,
    frames_sent: u64,
    opened: bool,
    quit_key: Option<KeyName>,
    // Board mode only: last drawn board (without footer) and last key pressed.
    board: Option<Vec<String>>,
    last_key: Option<KeyName>,
}

impl<S: FrameSink, C: Console> ConnectionShell<S, C> {
    /// Creates a shell in the `Connecting` state.
    pub fn new(endpoint: Endpoint, display: DisplayMode, sink: S, console: C) -> Self {
        Self {
            endpoint,
            display,
            state: ConnectionState::Connecting,
            sink,
            console,
            frames_sent: 0,
            opened: false,
            quit_key: None,
            board: None,
            last_key: None,
        }
    }

    /// Names the local quit key in the board footer.
    pub fn with_quit_key(mut self, quit_key: Option<KeyName>) -> Self {
        self.quit_key = quit_key;
        self
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// `true` once the handshake has completed for this connection.
    pub fn was_opened(&self) -> bool {
        self.opened
    }

    /// Number of key frames handed to the sink so far.
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    /// Applies one event.
    ///
    /// # Errors
    ///
    /// Returns the handler's [`ShellError`]; the caller decides whether to
    /// continue (the event loop always does).
    pub fn handle(&mut self, event: ShellEvent) -> Result<Flow, ShellError> {
        debug!("{}: handling {} event", self.endpoint, event.kind());
        match event {
            ShellEvent::Opened => self.on_open(),
            ShellEvent::Message(payload) => self.on_message(&payload)?,
            ShellEvent::Error(error) => self.on_error(&error),
            ShellEvent::KeyDown(key) => self.on_key_down(&key)?,
            ShellEvent::Closed { code, reason } => {
                self.on_close(code, &reason);
                return Ok(Flow::Stop);
            }
            ShellEvent::Shutdown => {
                self.shutdown()?;
                if self.state == ConnectionState::Closed {
                    return Ok(Flow::Stop);
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// The handshake completed.
    ///
    /// Only the first call per connection does anything; repeats are ignored.
    pub fn on_open(&mut self) {
        if self.state != ConnectionState::Connecting {
            warn!(
                "{}: ignoring open event in state {:?}",
                self.endpoint, self.state
            );
            return;
        }
        self.state = ConnectionState::Open;
        self.opened = true;
        info!("connected to {}", self.endpoint);
        self.console.log(OPEN_LINE);
    }

    /// One inbound text frame arrived.
    ///
    /// In `Log` mode the raw payload is logged first, then the value of its
    /// `gridString` field (`undefined` when missing).  In `Board` mode the
    /// screen is redrawn instead.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Decode`] if the payload is not valid JSON.  In
    /// `Log` mode the raw payload has already been logged by then.
    pub fn on_message(&mut self, payload: &str) -> Result<(), ShellError> {
        match self.display {
            DisplayMode::Log => {
                self.console.log(payload);
                let msg = InboundMessage::decode(payload)?;
                self.console.log(&msg.grid_string().to_string());
            }
            DisplayMode::Board => {
                debug!("{}: inbound payload: {payload}", self.endpoint);
                let msg = InboundMessage::decode(payload)?;
                match self.board_lines(&msg) {
                    Some(lines) => {
                        self.board = Some(lines);
                        self.redraw();
                    }
                    None => debug!("{}: payload has nothing to draw", self.endpoint),
                }
            }
        }
        Ok(())
    }

    /// The transport reported an error.  Logged only; nothing is closed.
    pub fn on_error(&mut self, error: &str) {
        warn!("{}: transport error: {error}", self.endpoint);
        self.console.log(&format!("transport error: {error}"));
    }

    /// A local key was pressed.
    ///
    /// Logs the key, then sends its name as one text frame.  In `Board` mode
    /// the key is shown in the footer of a redrawn screen instead of a line.
    ///
    /// # Errors
    ///
    /// - [`ShellError::NotOpen`] before the handshake completes (nothing sent)
    /// - [`ShellError::Closed`] once closing has started (nothing sent)
    /// - [`ShellError::Sink`] if the transport has gone away
    pub fn on_key_down(&mut self, key: &KeyPress) -> Result<(), ShellError> {
        match self.display {
            DisplayMode::Log => self.console.log(&key.to_string()),
            DisplayMode::Board => {
                debug!("{}: {key}", self.endpoint);
                self.last_key = Some(key.key);
                self.redraw();
            }
        }

        match self.state {
            ConnectionState::Connecting => return Err(ShellError::NotOpen),
            ConnectionState::Closing | ConnectionState::Closed => return Err(ShellError::Closed),
            ConnectionState::Open => {}
        }

        let frame = KeyFrame::new(&key.key);
        self.sink.send_text(frame.into_text())?;
        self.frames_sent += 1;
        Ok(())
    }

    /// The transport is gone.
    ///
    /// A connection that never opened has nothing to disconnect from; the
    /// transport error already said why, so no console line is written.
    pub fn on_close(&mut self, code: Option<u16>, reason: &str) {
        self.state = ConnectionState::Closed;
        let code = code.map_or_else(|| "none".to_string(), |c| c.to_string());
        if !self.opened {
            info!(
                "{}: closed before opening (code {code}, reason {reason:?})",
                self.endpoint
            );
            return;
        }
        info!(
            "disconnected from {} (code {code}, reason {reason:?})",
            self.endpoint
        );
        self.console
            .log(&format!("disconnected from server (code {code}, reason {reason:?})"));
    }

    /// Starts closing the connection.
    ///
    /// Sends a Close frame and moves to `Closing`; the transport reports
    /// `Closed` once the server answers (or the event loop gives up waiting).
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Sink`] if the transport has already ended.  The
    /// state still moves to `Closed` in that case.
    pub fn shutdown(&mut self) -> Result<(), ShellError> {
        match self.state {
            ConnectionState::Closing | ConnectionState::Closed => return Ok(()),
            ConnectionState::Connecting | ConnectionState::Open => {}
        }
        info!("{}: closing connection", self.endpoint);
        if let Err(e) = self.sink.close() {
            self.state = ConnectionState::Closed;
            return Err(e.into());
        }
        self.state = ConnectionState::Closing;
        Ok(())
    }

    /// Board-mode screen for one message: the `gridString` text if present,
    /// otherwise the rendered `grid`/`clients` snapshot.
    fn board_lines(&self, msg: &InboundMessage) -> Option<Vec<String>> {
        match msg.grid_string() {
            GridString::Text(text) => Some(text.lines().map(str::to_string).collect()),
            _ => BoardSnapshot::from_message(msg).map(|snap| snap.render()),
        }
    }

    /// Draws the last board (if any), a blank line, and the footer.
    fn redraw(&self) {
        let mut lines = self.board.clone().unwrap_or_default();
        lines.push(String::new());
        lines.push(self.footer());
        self.console.draw(&lines);
    }

    fn footer(&self) -> String {
        let quit = match self.quit_key {
            Some(k) => format!("Ctrl+C or {k} to quit"),
            None => "Ctrl+C to quit".to_string(),
        };
        match self.last_key {
            Some(k) => format!("{}  ·  last key {k}  ·  {quit}", self.endpoint),
            None => format!("{}  ·  {quit}", self.endpoint),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
