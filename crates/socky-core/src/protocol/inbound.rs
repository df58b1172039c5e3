//! Decoding of inbound text frames.
//!
//! The server sends JSON text frames.  The only field the client relies on is
//! `gridString`, and even that one is optional: a payload without it is still
//! a valid message, it just has nothing to show.
//!
//! # Wire shape
//!
//! ```json
//! {"gridString":"· · ◉ ◉\n· f · ·"}
//! ```
//!
//! Any other fields are ignored by [`InboundMessage::grid_string`].  The full
//! decoded [`serde_json::Value`] is kept so that richer views (see
//! [`crate::protocol::board`]) can pick out more fields without a second
//! decode.
//!
//! # What counts as an error?
//!
//! Only text that is not JSON at all.  A payload that is valid JSON but has an
//! unexpected shape (an array, a number, an object without `gridString`)
//! decodes successfully and reports [`GridString::Absent`].

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Name of the JSON field holding the pre-rendered board text.
pub const GRID_STRING_FIELD: &str = "gridString";

/// Marker printed in place of a missing `gridString`.
pub const ABSENT_MARKER: &str = "undefined";

/// Errors that can occur while decoding an inbound text frame.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The frame text is not valid JSON.
    #[error("inbound payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// One decoded inbound text frame.
///
/// Holds both the raw text (for logging it verbatim) and the decoded JSON
/// value.  No schema is enforced beyond "this is JSON".
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    raw: String,
    body: Value,
}

impl InboundMessage {
    /// Decodes a text frame as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidJson`] if `raw` is not valid JSON.
    ///
    /// # Example
    ///
    /// ```rust
    /// use socky_core::{GridString, InboundMessage};
    ///
    /// let msg = InboundMessage::decode(r#"{"gridString":"abc"}"#).unwrap();
    /// assert_eq!(msg.grid_string(), GridString::Text("abc"));
    /// ```
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let body = serde_json::from_str(raw)?;
        Ok(Self {
            raw: raw.to_string(),
            body,
        })
    }

    /// The frame text exactly as it arrived.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The decoded JSON value.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Looks up the `gridString` field.
    ///
    /// Never fails: a missing field, or a top-level value that is not an
    /// object, yields [`GridString::Absent`].
    pub fn grid_string(&self) -> GridString<'_> {
        match self.body.get(GRID_STRING_FIELD) {
            Some(Value::String(s)) => GridString::Text(s),
            Some(other) => GridString::Other(other),
            None => GridString::Absent,
        }
    }
}

/// The value found in an inbound payload's `gridString` field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridString<'a> {
    /// The field holds a string, as the server normally sends.
    Text(&'a str),
    /// The field exists but holds some other JSON type.
    Other(&'a Value),
    /// The field is missing.
    Absent,
}

impl GridString<'_> {
    /// Returns the text if the field held a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            GridString::Text(s) => Some(s),
            _ => None,
        }
    }

    /// `true` when the payload had no `gridString` field at all.
    pub fn is_absent(&self) -> bool {
        matches!(self, GridString::Absent)
    }
}

impl fmt::Display for GridString<'_> {
    /// Strings print as-is, other JSON values print as JSON text, and a
    /// missing field prints as `undefined`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridString::Text(s) => f.write_str(s),
            GridString::Other(v) => write!(f, "{v}"),
            GridString::Absent => f.write_str(ABSENT_MARKER),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_grid_string_text() {
        // Arrange / Act
        let msg = InboundMessage::decode(r#"{"gridString":"abc"}"#).unwrap();

        // Assert
        assert_eq!(msg.grid_string(), GridString::Text("abc"));
        assert_eq!(msg.grid_string().to_string(), "abc");
    }

    #[test]
    fn test_decode_keeps_raw_text_verbatim() {
        let raw = "{ \"gridString\" : \"abc\" ,\"x\":1}";
        let msg = InboundMessage::decode(raw).unwrap();
        assert_eq!(msg.raw(), raw);
    }

    #[test]
    fn test_missing_field_is_absent_not_error() {
        // Arrange / Act
        let msg = InboundMessage::decode(r#"{"other":1}"#).unwrap();

        // Assert
        assert!(msg.grid_string().is_absent());
        assert_eq!(msg.grid_string().to_string(), "undefined");
    }

    #[test]
    fn test_non_object_payload_is_absent() {
        let msg = InboundMessage::decode("[1,2,3]").unwrap();
        assert!(msg.grid_string().is_absent());

        let msg = InboundMessage::decode("42").unwrap();
        assert!(msg.grid_string().is_absent());
    }

    #[test]
    fn test_non_string_field_prints_as_json() {
        let msg = InboundMessage::decode(r#"{"gridString":[1,"a"]}"#).unwrap();

        let grid = msg.grid_string();
        assert!(matches!(grid, GridString::Other(_)));
        assert_eq!(grid.as_text(), None);
        assert_eq!(grid.to_string(), r#"[1,"a"]"#);
    }

    #[test]
    fn test_null_field_is_other_not_absent() {
        let msg = InboundMessage::decode(r#"{"gridString":null}"#).unwrap();
        assert_eq!(msg.grid_string().to_string(), "null");
        assert!(!msg.grid_string().is_absent());
    }

    #[test]
    fn test_invalid_json_returns_error() {
        // Arrange / Act
        let result = InboundMessage::decode("not json");

        // Assert: must return an error, not panic
        assert!(matches!(result, Err(DecodeError::InvalidJson(_))));
    }

    #[test]
    fn test_empty_payload_returns_error() {
        assert!(InboundMessage::decode("").is_err());
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let msg =
            InboundMessage::decode(r#"{"type":"state","gridString":"x","clients":[]}"#).unwrap();
        assert_eq!(msg.grid_string().as_text(), Some("x"));
        assert_eq!(msg.body()["type"], "state");
    }
}
