//! socky-client library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does socky-client do?
//!
//! It is a thin terminal front end for a socky game server.  It opens one
//! WebSocket to the server and then, until either side closes:
//!
//! 1. Logs that the connection is open.
//! 2. Logs every text message the server sends, followed by the message's
//!    `gridString` field (or `undefined` when the field is missing).  With
//!    `--display board` the board is redrawn in place instead.
//! 3. Sends the DOM name of every key pressed ("ArrowUp", "a", ...) as a raw
//!    text frame.
//! 4. Logs transport errors and the final close.
//!
//! # Layers
//!
//! - [`domain`]: configuration and event types, no I/O.
//! - [`application`]: the connection shell and its event loop, talking to
//!   the outside world only through the `FrameSink` and `Console` ports.
//! - [`infrastructure`]: WebSocket transport, terminal console, keyboard
//!   reader, and the `run_client` wiring.

/// Domain layer: configuration and events.
pub mod domain;

/// Application layer: connection shell and event loop.
pub mod application;

/// Infrastructure layer: WebSocket, terminal, and keyboard adapters.
pub mod infrastructure;
