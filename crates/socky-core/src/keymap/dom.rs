//! DOM-style key names (`KeyboardEvent.key` spelling).
//!
//! The server was written against a browser client, so it expects the key
//! names a browser produces: printable keys are the character itself
//! (`"a"`, `"A"`, `" "`), everything else has a fixed name (`"Enter"`,
//! `"ArrowUp"`, `"Escape"`, `"F5"`).
//!
//! # Example
//!
//! ```rust
//! use socky_core::{KeyName, NamedKey};
//!
//! assert_eq!(KeyName::Named(NamedKey::ArrowUp).to_string(), "ArrowUp");
//! assert_eq!("ArrowUp".parse::<KeyName>().unwrap(), KeyName::Named(NamedKey::ArrowUp));
//! assert_eq!("q".parse::<KeyName>().unwrap(), KeyName::Character('q'));
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Non-printable keys with a fixed DOM name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,
    ContextMenu,
    Clear,
    Shift,
    Control,
    Alt,
    AltGraph,
    Meta,
    /// A key the platform reported but that has no DOM name.
    Unidentified,
}

/// Every named key, in declaration order.  Used for name lookups.
const ALL_NAMED: [NamedKey; 27] = [
    NamedKey::Enter,
    NamedKey::Tab,
    NamedKey::Backspace,
    NamedKey::Escape,
    NamedKey::Delete,
    NamedKey::Insert,
    NamedKey::Home,
    NamedKey::End,
    NamedKey::PageUp,
    NamedKey::PageDown,
    NamedKey::ArrowUp,
    NamedKey::ArrowDown,
    NamedKey::ArrowLeft,
    NamedKey::ArrowRight,
    NamedKey::CapsLock,
    NamedKey::ScrollLock,
    NamedKey::NumLock,
    NamedKey::PrintScreen,
    NamedKey::Pause,
    NamedKey::ContextMenu,
    NamedKey::Clear,
    NamedKey::Shift,
    NamedKey::Control,
    NamedKey::Alt,
    NamedKey::AltGraph,
    NamedKey::Meta,
    NamedKey::Unidentified,
];

impl NamedKey {
    /// The DOM spelling of this key.
    pub fn as_str(self) -> &'static str {
        match self {
            NamedKey::Enter => "Enter",
            NamedKey::Tab => "Tab",
            NamedKey::Backspace => "Backspace",
            NamedKey::Escape => "Escape",
            NamedKey::Delete => "Delete",
            NamedKey::Insert => "Insert",
            NamedKey::Home => "Home",
            NamedKey::End => "End",
            NamedKey::PageUp => "PageUp",
            NamedKey::PageDown => "PageDown",
            NamedKey::ArrowUp => "ArrowUp",
            NamedKey::ArrowDown => "ArrowDown",
            NamedKey::ArrowLeft => "ArrowLeft",
            NamedKey::ArrowRight => "ArrowRight",
            NamedKey::CapsLock => "CapsLock",
            NamedKey::ScrollLock => "ScrollLock",
            NamedKey::NumLock => "NumLock",
            NamedKey::PrintScreen => "PrintScreen",
            NamedKey::Pause => "Pause",
            NamedKey::ContextMenu => "ContextMenu",
            NamedKey::Clear => "Clear",
            NamedKey::Shift => "Shift",
            NamedKey::Control => "Control",
            NamedKey::Alt => "Alt",
            NamedKey::AltGraph => "AltGraph",
            NamedKey::Meta => "Meta",
            NamedKey::Unidentified => "Unidentified",
        }
    }

    /// Looks up a named key by its DOM spelling (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_NAMED.iter().copied().find(|k| k.as_str() == name)
    }
}

/// The name of one pressed key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyName {
    /// A printable key; the name is the character itself.
    Character(char),
    /// Function key `F1`..`F24` (the number is not range-checked).
    Function(u8),
    /// Any other key with a fixed name.
    Named(NamedKey),
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyName::Character(c) => write!(f, "{c}"),
            KeyName::Function(n) => write!(f, "F{n}"),
            KeyName::Named(k) => f.write_str(k.as_str()),
        }
    }
}

/// Error returned when a string is not a known key name.
#[derive(Debug, Error, PartialEq)]
pub enum KeyNameError {
    #[error("empty key name")]
    Empty,
    #[error("unknown key name: {0:?}")]
    Unknown(String),
}

impl FromStr for KeyName {
    type Err = KeyNameError;

    /// Parses a DOM key name.  A single character is a [`KeyName::Character`];
    /// `F<n>` is a function key; anything else must be a [`NamedKey`] name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => return Err(KeyNameError::Empty),
            (Some(c), None) => return Ok(KeyName::Character(c)),
            _ => {}
        }

        if let Some(n) = s.strip_prefix('F').and_then(|d| d.parse::<u8>().ok()) {
            if n >= 1 {
                return Ok(KeyName::Function(n));
            }
        }

        NamedKey::from_name(s)
            .map(KeyName::Named)
            .ok_or_else(|| KeyNameError::Unknown(s.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
