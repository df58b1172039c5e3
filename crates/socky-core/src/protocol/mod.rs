//! Protocol module containing the inbound payload decoder, the outbound key
//! frame, and the board snapshot extracted from inbound payloads.

pub mod board;
pub mod inbound;
pub mod outbound;

pub use board::{BoardSnapshot, PlayerSummary};
pub use inbound::{DecodeError, GridString, InboundMessage, GRID_STRING_FIELD};
pub use outbound::KeyFrame;
