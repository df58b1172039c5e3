//! socky terminal client entry point.
//!
//! Parses the command line, sets up logging, and hands a [`ClientConfig`] to
//! [`run_client`], which runs exactly one WebSocket session.
//!
//! # Environment variables
//!
//! Every flag can also be set through the environment:
//!
//! | Flag                 | Variable                 | Default                  |
//! |----------------------|--------------------------|--------------------------|
//! | `--endpoint`         | `SOCKY_SERVER_URL`       | `ws://localhost:8080/ws` |
//! | `--display`          | `SOCKY_DISPLAY`          | `log`                    |
//! | `--quit-key`         | `SOCKY_QUIT_KEY`         | none                     |
//! | `--close-timeout-ms` | `SOCKY_CLOSE_TIMEOUT_MS` | `2000`                   |
//!
//! Diagnostics go to stderr and are filtered by `RUST_LOG` (default `warn`),
//! so they never interleave with the console output on stdout.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use socky_core::KeyName;
use tracing::info;
use tracing_subscriber::EnvFilter;

use socky_client::domain::{ClientConfig, DisplayMode, Endpoint, DEFAULT_ENDPOINT};
use socky_client::infrastructure::run_client;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Terminal client for a socky game server.
///
/// Shows what the server broadcasts and forwards every key you press as a
/// DOM key name ("ArrowUp", "a", "Enter", ...).  Press Ctrl+C to quit.
#[derive(Debug, Parser)]
#[command(name = "socky", about = "Terminal WebSocket client for socky", version)]
struct Cli {
    /// WebSocket URL of the server (ws:// or wss://).
    #[arg(long, default_value = DEFAULT_ENDPOINT, env = "SOCKY_SERVER_URL")]
    endpoint: String,

    /// How inbound messages are shown: `log` prints each raw payload and its
    /// gridString, `board` redraws the game board in place.
    #[arg(long, default_value = "log", env = "SOCKY_DISPLAY")]
    display: String,

    /// A key that quits locally instead of being sent (e.g. `q` or `Escape`).
    #[arg(long, env = "SOCKY_QUIT_KEY")]
    quit_key: Option<String>,

    /// Milliseconds to wait for the server to confirm a client-initiated close.
    #[arg(long, default_value_t = 2000, env = "SOCKY_CLOSE_TIMEOUT_MS")]
    close_timeout_ms: u64,
}

impl Cli {
    /// Converts the parsed CLI arguments into a [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a ws/wss URL, the display mode
    /// is unknown, or the quit key is not a recognised key name.
    fn into_client_config(self) -> anyhow::Result<ClientConfig> {
        let endpoint = Endpoint::parse(&self.endpoint)
            .with_context(|| format!("invalid --endpoint '{}'", self.endpoint))?;

        let display: DisplayMode = self.display.parse().context("invalid --display")?;

        let quit_key = self
            .quit_key
            .as_deref()
            .map(str::parse::<KeyName>)
            .transpose()
            .context("invalid --quit-key")?;

        Ok(ClientConfig {
            endpoint,
            display,
            quit_key,
            close_timeout: Duration::from_millis(self.close_timeout_ms),
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout belongs to the console; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_client_config()?;
    info!(
        "socky client starting: endpoint={} display={:?}",
        config.endpoint, config.display
    );

    run_client(config).await
}

// ── Tests ─────────────────────────────────────────────────────────────────────
