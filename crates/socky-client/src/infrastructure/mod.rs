//! Infrastructure layer for the client application.
//!
//! Contains the terminal- and network-facing adapters.
//!
//! **Dependency rule**: this layer may depend on `application`, `domain`, and
//! `socky_core`, but MUST NOT be imported by the `application` or domain
//! layers (tests excepted, which borrow the mocks).
//!
//! # Sub-modules
//!
//! - **`transport`** – WebSocket client task and the `WsFrameSink` port
//!   implementation.  A `MockFrameSink` is also provided for tests.
//!
//! - **`console`** – `TerminalConsole` (raw-mode friendly line output and
//!   full-screen redraws) plus a recording console for tests.
//!
//! - **`keyboard`** – raw mode guard, crossterm key reader, and the key code
//!   to DOM key name translation.
//!
//! - **`session`** – `run_client`, which wires all of the above to the shell.

pub mod console;
pub mod keyboard;
pub mod session;
pub mod transport;

pub use session::run_client;
