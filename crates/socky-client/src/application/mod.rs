//! Application layer for socky-client.
//!
//! The application layer decides *what* happens for each event; the
//! infrastructure layer decides *how* frames reach the network and lines
//! reach the screen.
//!
//! # Responsibilities
//!
//! - The [`ConnectionShell`] and its handlers
//! - The [`FrameSink`] and [`Console`] ports the shell talks through
//! - The single-consumer event loop
//!
//! # What does NOT belong here?
//!
//! - Opening sockets or reading the terminal (that is infrastructure)
//! - WebSocket framing (handled by tokio-tungstenite)

pub mod event_loop;
pub mod shell;

pub use event_loop::run_event_loop;
pub use shell::{Console, ConnectionShell, Flow, FrameSink, ShellError, SinkError, OPEN_LINE};
