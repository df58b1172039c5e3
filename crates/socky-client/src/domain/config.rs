//! Client configuration types.
//!
//! [`ClientConfig`] is the single source of truth for all runtime settings.
//! `main.rs` builds it from CLI arguments and environment variables; tests
//! build it directly or start from [`ClientConfig::default`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use socky_core::KeyName;
use thiserror::Error;
use url::Url;

/// The endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8080/ws";

/// Errors produced while validating an endpoint address.
#[derive(Debug, Error, PartialEq)]
pub enum EndpointError {
    /// The string is not a URL at all.
    #[error("invalid endpoint {input:?}: {reason}")]
    Invalid { input: String, reason: String },

    /// The URL scheme is not `ws` or `wss`.
    #[error("unsupported endpoint scheme {0:?} (expected ws or wss)")]
    UnsupportedScheme(String),

    /// The URL has no host part.
    #[error("endpoint {0:?} has no host")]
    MissingHost(String),
}

/// A validated WebSocket endpoint address (`ws://` or `wss://`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(Url);

impl Endpoint {
    /// Parses and validates an endpoint address.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError`] if `input` is not a URL, uses a scheme other
    /// than `ws`/`wss`, or has no host.
    pub fn parse(input: &str) -> Result<Self, EndpointError> {
        let url = Url::parse(input).map_err(|e| EndpointError::Invalid {
            input: input.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "ws" | "wss" => {}
            other => return Err(EndpointError::UnsupportedScheme(other.to_string())),
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(EndpointError::MissingHost(input.to_string()));
        }

        Ok(Self(url))
    }

    /// The endpoint as a string, suitable for the WebSocket handshake.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        // The default address is a compile-time constant known to be valid.
        Self(Url::parse(DEFAULT_ENDPOINT).unwrap())
    }
}

/// How inbound messages are shown on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Log each raw payload, then its `gridString` (or `undefined`).
    #[default]
    Log,
    /// Clear the screen and draw the board on every message.
    Board,
}

/// Error returned when a string names no [`DisplayMode`].
#[derive(Debug, Error, PartialEq)]
#[error("unknown display mode {0:?} (expected log or board)")]
pub struct DisplayModeError(pub String);

impl FromStr for DisplayMode {
    type Err = DisplayModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "log" => Ok(DisplayMode::Log),
            "board" => Ok(DisplayMode::Board),
            _ => Err(DisplayModeError(s.to_string())),
        }
    }
}

/// All runtime configuration for the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server address to connect to.
    pub endpoint: Endpoint,

    /// Console presentation of inbound messages.
    pub display: DisplayMode,

    /// Optional local key that ends the session instead of being forwarded.
    ///
    /// Ctrl+C always ends the session; this adds a second, single-key way out.
    pub quit_key: Option<KeyName>,

    /// How long to wait for the server's Close reply after a shutdown request.
    pub close_timeout: Duration,
}

impl Default for ClientConfig {
    /// | Field         | Default                  |
    /// |---------------|--------------------------|
    /// | endpoint      | `ws://localhost:8080/ws` |
    /// | display       | `Log`                    |
    /// | quit_key      | none                     |
    /// | close_timeout | 2 seconds                |
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            display: DisplayMode::default(),
            quit_key: None,
            close_timeout: Duration::from_secs(2),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint_is_localhost_ws_path() {
        // Arrange / Act
        let cfg = ClientConfig::default();
        // Assert
        assert_eq!(cfg.endpoint.as_str(), "ws://localhost:8080/ws");
    }

    #[test]
    fn test_default_display_is_log() {
        assert_eq!(ClientConfig::default().display, DisplayMode::Log);
    }

    #[test]
    fn test_default_has_no_quit_key() {
        assert!(ClientConfig::default().quit_key.is_none());
    }

    #[test]
    fn test_default_close_timeout_is_2s() {
        assert_eq!(ClientConfig::default().close_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_endpoint_accepts_wss() {
        let ep = Endpoint::parse("wss://example.com:443/ws").unwrap();
        assert_eq!(ep.to_string(), "wss://example.com/ws");
    }

    #[test]
    fn test_endpoint_rejects_http_scheme() {
        assert_eq!(
            Endpoint::parse("http://localhost:8080/ws"),
            Err(EndpointError::UnsupportedScheme("http".into()))
        );
    }

    #[test]
    fn test_endpoint_rejects_garbage() {
        assert!(matches!(
            Endpoint::parse("not a url"),
            Err(EndpointError::Invalid { .. })
        ));
    }

    #[test]
    fn test_display_mode_parse_is_case_insensitive() {
        assert_eq!("Board".parse::<DisplayMode>(), Ok(DisplayMode::Board));
        assert_eq!("log".parse::<DisplayMode>(), Ok(DisplayMode::Log));
        assert_eq!(
            "fancy".parse::<DisplayMode>(),
            Err(DisplayModeError("fancy".into()))
        );
    }
}
