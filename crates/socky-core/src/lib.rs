//! # socky-core
//!
//! Shared library for the socky client containing the inbound payload
//! decoder, the outbound key frame, board rendering, and DOM-style key names.
//!
//! It has zero dependencies on terminals, sockets, or async runtimes, so
//! everything in here can be tested with plain `#[test]` functions.
//!
//! # Architecture overview (for beginners)
//!
//! The socky server runs a multiplayer game and pushes the game state to every
//! connected client as a JSON text frame.  The client answers with the names
//! of the keys the player presses, one key per frame.
//!
//! This crate (`socky-core`) is the shared foundation.  It defines:
//!
//! - **`protocol`** – What travels over the WebSocket.  Inbound text frames
//!   are decoded into an [`InboundMessage`] whose `gridString` field can be
//!   read without any schema being enforced.  Outbound frames are bare key
//!   names ([`KeyFrame`]).  The optional [`BoardSnapshot`] extracts the
//!   `grid` and `clients` fields the server also sends and renders them as
//!   text.
//!
//! - **`keymap`** – Key names spelled the way a browser spells
//!   `KeyboardEvent.key` (`"a"`, `"Enter"`, `"ArrowUp"`).  The terminal
//!   keyboard layer translates its native key codes into these names.

pub mod keymap;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `socky_core::InboundMessage` instead of the full module path.
pub use keymap::dom::{KeyName, NamedKey};
pub use protocol::board::{BoardSnapshot, PlayerSummary};
pub use protocol::inbound::{DecodeError, GridString, InboundMessage};
pub use protocol::outbound::KeyFrame;
