//! Connection transports.
//!
//! The production transport is the tokio-tungstenite WebSocket client in
//! [`websocket`].  [`mock`] records frames in memory for tests.

pub mod mock;
pub mod websocket;

pub use websocket::{connect, EventSender, WsFrameSink, CLOSE_REASON};
