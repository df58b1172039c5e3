//! Domain layer for socky-client.
//!
//! Pure types with no I/O: the client configuration, the events the
//! connection shell reacts to, and the connection state it tracks.
//!
//! # What does NOT belong here?
//!
//! - Any `tokio`, `WebSocket`, or terminal types
//! - Environment variable reading (that is done in `main.rs`)

pub mod config;
pub mod events;

pub use config::{
    ClientConfig, DisplayMode, DisplayModeError, Endpoint, EndpointError, DEFAULT_ENDPOINT,
};
pub use events::{ConnectionState, KeyPress, Modifiers, ShellEvent};
