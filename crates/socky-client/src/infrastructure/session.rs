//! Wires the adapters to the shell and runs one session.
//!
//! ```text
//! run_client()
//!  ├─ RawModeGuard::enable()       -- terminal restored on return
//!  ├─ transport::connect()         -- WebSocket task  ─┐
//!  ├─ keyboard::spawn_key_reader() -- key task        ─┼─▶ event queue
//!  ├─ Ctrl+C task (SIGINT)         -- Shutdown        ─┘        │
//!  └─ run_event_loop()             -- single consumer ◀─────────┘
//! ```

use anyhow::{bail, Context};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::application::{run_event_loop, Console, ConnectionShell, FrameSink};
use crate::domain::{ClientConfig, Endpoint, ShellEvent};
use crate::infrastructure::console::TerminalConsole;
use crate::infrastructure::keyboard::{spawn_key_reader, RawModeGuard};
use crate::infrastructure::transport;

/// Runs one client session against `config.endpoint` until the connection
/// closes or the user quits.
///
/// # Errors
///
/// Fails if the terminal cannot be switched to raw mode, or if the connection
/// never opened (refused, unreachable, or abandoned before the handshake).
/// Failures after the connection opened are logged to the console and end
/// (or continue) the session instead.
pub async fn run_client(config: ClientConfig) -> anyhow::Result<()> {
    let (events_tx, events_rx) = mpsc::unbounded_channel();

    let _raw_mode = RawModeGuard::enable().context("failed to put the terminal into raw mode")?;

    info!("connecting to {}", config.endpoint);
    let sink = transport::connect(&config.endpoint, events_tx.clone());

    let keyboard = spawn_key_reader(events_tx.clone(), config.quit_key);

    // Raw mode swallows Ctrl+C as a key press, but SIGINT can still arrive
    // from outside (e.g. `kill -INT`).
    let signal_tx = events_tx;
    let signal = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            let _ = signal_tx.send(ShellEvent::Shutdown);
        }
    });

    let shell = ConnectionShell::new(
        config.endpoint.clone(),
        config.display,
        sink,
        TerminalConsole::stdout(),
    )
    .with_quit_key(config.quit_key);
    let shell = run_event_loop(shell, events_rx, config.close_timeout).await;

    keyboard.abort();
    signal.abort();
    debug!(
        "session over: state {:?}, {} key frame(s) sent",
        shell.state(),
        shell.frames_sent()
    );
    session_outcome(&shell, &config.endpoint)
}

/// Maps a finished session to the process result.
fn session_outcome<S: FrameSink, C: Console>(
    shell: &ConnectionShell<S, C>,
    endpoint: &Endpoint,
) -> anyhow::Result<()> {
    if !shell.was_opened() {
        bail!("could not connect to {endpoint}");
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
