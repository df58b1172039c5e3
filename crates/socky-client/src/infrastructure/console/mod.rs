//! Console implementations.
//!
//! [`terminal`] writes to the real (raw-mode) terminal; [`mock`] records
//! lines and screens in memory for tests.

pub mod mock;
pub mod terminal;

pub use terminal::TerminalConsole;
