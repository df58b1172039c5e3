//! Key name tables.
//!
//! The canonical representation on the wire is the DOM `KeyboardEvent.key`
//! spelling.  Platform key codes are translated into it at the capture
//! boundary (see the client's keyboard module).

pub mod dom;

pub use dom::{KeyName, NamedKey};
