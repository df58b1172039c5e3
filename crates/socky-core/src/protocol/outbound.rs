//! Outbound frames: one key name per text frame.
//!
//! There is no envelope, no sequence number, and no JSON.  The frame payload
//! is exactly the key name, e.g. `ArrowUp` or `k`.

use crate::keymap::dom::KeyName;

/// A single outbound text frame carrying one key name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFrame(String);

impl KeyFrame {
    /// Builds the frame for `key`.
    pub fn new(key: &KeyName) -> Self {
        Self(key.to_string())
    }

    /// The frame payload.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the frame, returning its payload.
    pub fn into_text(self) -> String {
        self.0
    }
}
