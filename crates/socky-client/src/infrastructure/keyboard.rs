//! Terminal keyboard input.
//!
//! Puts the terminal into raw mode (so every key press arrives immediately and
//! is not echoed) and turns crossterm key events into [`ShellEvent`]s:
//!
//! - Ctrl+C and the configured quit key become [`ShellEvent::Shutdown`].
//! - Every other press or auto-repeat becomes [`ShellEvent::KeyDown`].
//! - Key releases are dropped (only keydowns are forwarded).
//!
//! Key codes are translated to DOM-style names so the server sees the same
//! strings a browser would send.

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode,
};
use crossterm::terminal;
use futures_util::StreamExt;
use socky_core::{KeyName, NamedKey};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::{KeyPress, Modifiers, ShellEvent};
use crate::infrastructure::transport::EventSender;

// ── Raw mode ──────────────────────────────────────────────────────────────────

/// RAII guard that enables raw mode and restores the terminal on drop.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    /// Enables raw mode.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if stdin is not a terminal or the mode switch
    /// fails.
    pub fn enable() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("failed to restore terminal mode: {e}");
        }
    }
}

// ── Translation ───────────────────────────────────────────────────────────────

/// Translates a crossterm key code to its DOM key name.
pub fn translate_key_code(code: KeyCode) -> KeyName {
    let named = match code {
        KeyCode::Char(c) => return KeyName::Character(c),
        KeyCode::F(n) => return KeyName::Function(n),
        KeyCode::Enter => NamedKey::Enter,
        // Shift+Tab is still the Tab key; the modifier carries the shift.
        KeyCode::Tab | KeyCode::BackTab => NamedKey::Tab,
        KeyCode::Backspace => NamedKey::Backspace,
        KeyCode::Esc => NamedKey::Escape,
        KeyCode::Delete => NamedKey::Delete,
        KeyCode::Insert => NamedKey::Insert,
        KeyCode::Home => NamedKey::Home,
        KeyCode::End => NamedKey::End,
        KeyCode::PageUp => NamedKey::PageUp,
        KeyCode::PageDown => NamedKey::PageDown,
        KeyCode::Up => NamedKey::ArrowUp,
        KeyCode::Down => NamedKey::ArrowDown,
        KeyCode::Left => NamedKey::ArrowLeft,
        KeyCode::Right => NamedKey::ArrowRight,
        KeyCode::CapsLock => NamedKey::CapsLock,
        KeyCode::ScrollLock => NamedKey::ScrollLock,
        KeyCode::NumLock => NamedKey::NumLock,
        KeyCode::PrintScreen => NamedKey::PrintScreen,
        KeyCode::Pause => NamedKey::Pause,
        KeyCode::Menu => NamedKey::ContextMenu,
        KeyCode::KeypadBegin => NamedKey::Clear,
        KeyCode::Modifier(m) => match m {
            ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => NamedKey::Shift,
            ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => NamedKey::Control,
            ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => NamedKey::Alt,
            ModifierKeyCode::LeftSuper
            | ModifierKeyCode::RightSuper
            | ModifierKeyCode::LeftMeta
            | ModifierKeyCode::RightMeta => NamedKey::Meta,
            ModifierKeyCode::IsoLevel3Shift => NamedKey::AltGraph,
            _ => NamedKey::Unidentified,
        },
        _ => NamedKey::Unidentified,
    };
    KeyName::Named(named)
}

/// Translates a crossterm key event into a keydown.
///
/// Returns `None` for key releases.
pub fn translate_key_event(event: &KeyEvent) -> Option<KeyPress> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let m = event.modifiers;
    Some(KeyPress {
        key: translate_key_code(event.code),
        modifiers: Modifiers {
            shift: m.contains(KeyModifiers::SHIFT),
            ctrl: m.contains(KeyModifiers::CONTROL),
            alt: m.contains(KeyModifiers::ALT),
            meta: m.intersects(KeyModifiers::SUPER | KeyModifiers::META),
        },
    })
}

/// Decides whether a keydown is forwarded or ends the session.
pub fn classify(press: KeyPress, quit_key: Option<KeyName>) -> ShellEvent {
    if press.is_interrupt() || quit_key == Some(press.key) {
        ShellEvent::Shutdown
    } else {
        ShellEvent::KeyDown(press)
    }
}

/// The event one terminal key event puts on the queue, if any.
///
/// Releases produce nothing; Ctrl+C and the quit key produce `Shutdown`.
pub fn shell_event_for(event: &KeyEvent, quit_key: Option<KeyName>) -> Option<ShellEvent> {
    translate_key_event(event).map(|press| classify(press, quit_key))
}

// ── Reader task ───────────────────────────────────────────────────────────────

/// Spawns a task that reads terminal key events and pushes them onto
/// `events` until the terminal stream ends or the queue is closed.
///
/// Raw mode should already be enabled (see [`RawModeGuard`]).
pub fn spawn_key_reader(events: EventSender, quit_key: Option<KeyName>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut stream = EventStream::new();
        while let Some(next) = stream.next().await {
            let key_event = match next {
                Ok(Event::Key(k)) => k,
                Ok(other) => {
                    debug!("ignoring terminal event: {other:?}");
                    continue;
                }
                Err(e) => {
                    warn!("terminal input error: {e}");
                    break;
                }
            };

            let Some(event) = shell_event_for(&key_event, quit_key) else {
                continue;
            };
            if matches!(event, ShellEvent::Shutdown) {
                info!("quit key pressed; shutting down");
            }
            if events.send(event).is_err() {
                debug!("event queue closed; stopping key reader");
                break;
            }
        }
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_arrow_keys_translate_to_dom_names() {
        assert_eq!(translate_key_code(KeyCode::Up).to_string(), "ArrowUp");
        assert_eq!(translate_key_code(KeyCode::Down).to_string(), "ArrowDown");
        assert_eq!(translate_key_code(KeyCode::Left).to_string(), "ArrowLeft");
        assert_eq!(translate_key_code(KeyCode::Right).to_string(), "ArrowRight");
    }

    #[test]
    fn test_printable_keys_are_the_character() {
        assert_eq!(translate_key_code(KeyCode::Char('k')).to_string(), "k");
        assert_eq!(translate_key_code(KeyCode::Char('K')).to_string(), "K");
        assert_eq!(translate_key_code(KeyCode::Char(' ')).to_string(), " ");
    }

    #[test]
    fn test_control_keys_translate() {
        assert_eq!(translate_key_code(KeyCode::Enter).to_string(), "Enter");
        assert_eq!(translate_key_code(KeyCode::Esc).to_string(), "Escape");
        assert_eq!(translate_key_code(KeyCode::BackTab).to_string(), "Tab");
        assert_eq!(translate_key_code(KeyCode::F(5)).to_string(), "F5");
        assert_eq!(translate_key_code(KeyCode::Null).to_string(), "Unidentified");
    }

    #[test]
    fn test_release_is_not_a_keydown() {
        let mut event = press(KeyCode::Char('a'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert!(translate_key_event(&event).is_none());
    }

    #[test]
    fn test_repeat_is_a_keydown() {
        let mut event = press(KeyCode::Char('a'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Repeat;
        assert!(translate_key_event(&event).is_some());
    }

    #[test]
    fn test_modifiers_are_carried() {
        let event = press(KeyCode::Char('x'), KeyModifiers::CONTROL | KeyModifiers::ALT);

        let key = translate_key_event(&event).unwrap();

        assert!(key.modifiers.ctrl);
        assert!(key.modifiers.alt);
        assert!(!key.modifiers.shift);
    }

    #[test]
    fn test_ctrl_c_classifies_as_shutdown() {
        let key = translate_key_event(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)).unwrap();
        assert_eq!(classify(key, None), ShellEvent::Shutdown);
    }

    #[test]
    fn test_quit_key_classifies_as_shutdown() {
        let key = translate_key_event(&press(KeyCode::Char('q'), KeyModifiers::NONE)).unwrap();
        assert_eq!(
            classify(key, Some(KeyName::Character('q'))),
            ShellEvent::Shutdown
        );
    }

    #[test]
    fn test_release_of_quit_key_does_nothing() {
        let mut event = press(KeyCode::Char('q'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(shell_event_for(&event, Some(KeyName::Character('q'))), None);
    }

    #[test]
    fn test_other_keys_are_forwarded() {
        let key = translate_key_event(&press(KeyCode::Char('q'), KeyModifiers::NONE)).unwrap();
        assert_eq!(classify(key, None), ShellEvent::KeyDown(key));
    }
}
