//! WebSocket transport: one connection, one task.
//!
//! [`connect`] returns immediately.  The handshake, the read loop, and all
//! writes happen inside a spawned Tokio task, which reports everything it
//! observes as [`ShellEvent`]s on the shared event queue:
//!
//! ```text
//!                ┌──────────── transport task ────────────┐
//! WsFrameSink ──▶│ outbound rx ──▶ ws sink ──▶ server     │
//!                │ server ──▶ ws stream ──▶ events tx ────┼──▶ event loop
//!                └────────────────────────────────────────┘
//! ```
//!
//! The task emits exactly one `Opened` (after a successful handshake) and
//! exactly one `Closed` (always, as its last event).

use std::borrow::Cow;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{
        protocol::{frame::coding::CloseCode, CloseFrame},
        Error as WsError, Message as WsMessage,
    },
};
use tracing::{debug, info, warn};

use crate::application::shell::{FrameSink, SinkError};
use crate::domain::{Endpoint, ShellEvent};

/// Reason sent in the Close frame when the client ends the session.
pub const CLOSE_REASON: &str = "closing from client";

/// Producer side of the shell's event queue.
pub type EventSender = UnboundedSender<ShellEvent>;

/// Commands from the shell to the transport task.
#[derive(Debug)]
enum Outbound {
    Text(String),
    Close,
}

/// Outbound half of a WebSocket connection.
///
/// Cheap to call from the event loop: both methods only push onto an
/// unbounded channel drained by the transport task.
#[derive(Debug, Clone)]
pub struct WsFrameSink {
    tx: UnboundedSender<Outbound>,
}

impl FrameSink for WsFrameSink {
    fn send_text(&self, text: String) -> Result<(), SinkError> {
        self.tx
            .send(Outbound::Text(text))
            .map_err(|_| SinkError::Disconnected)
    }

    fn close(&self) -> Result<(), SinkError> {
        self.tx
            .send(Outbound::Close)
            .map_err(|_| SinkError::Disconnected)
    }
}

/// Opens a WebSocket connection to `endpoint` in the background.
///
/// Must be called from inside a Tokio runtime.  Returns the sink right away;
/// `Opened` (or `Error` + `Closed`) arrives on `events` once the handshake
/// settles.  There is no retry.
pub fn connect(endpoint: &Endpoint, events: EventSender) -> WsFrameSink {
    let (tx, rx) = mpsc::unbounded_channel();
    let endpoint = endpoint.clone();
    tokio::spawn(async move {
        run_connection(endpoint, events, rx).await;
    });
    WsFrameSink { tx }
}

/// Body of the transport task.  Always ends by emitting `Closed`.
async fn run_connection(
    endpoint: Endpoint,
    events: EventSender,
    mut outbound: UnboundedReceiver<Outbound>,
) {
    let (code, reason) = drive_connection(&endpoint, &events, &mut outbound).await;
    debug!("{endpoint}: transport task finished");
    // The event loop may already be gone; nothing left to tell anyone then.
    let _ = events.send(ShellEvent::Closed { code, reason });
}

/// Handshake, then pump frames both ways until either side closes.
///
/// Returns the close code and reason to report.
async fn drive_connection(
    endpoint: &Endpoint,
    events: &EventSender,
    outbound: &mut UnboundedReceiver<Outbound>,
) -> (Option<u16>, String) {
    // ── Step 1: handshake, abandoned if the shell closes first ───────────────
    let handshake = connect_async(endpoint.as_str());
    tokio::pin!(handshake);

    let ws_stream = loop {
        tokio::select! {
            result = &mut handshake => match result {
                Ok((stream, _response)) => break stream,
                Err(e) => {
                    warn!("{endpoint}: connect failed: {e}");
                    let _ = events.send(ShellEvent::Error(format!(
                        "failed to connect to {endpoint}: {e}"
                    )));
                    return (None, "connect failed".to_string());
                }
            },
            cmd = outbound.recv() => match cmd {
                Some(Outbound::Text(_)) => {
                    // The shell never sends before `Opened`; drop defensively.
                    warn!("{endpoint}: dropping frame queued before the handshake completed");
                }
                Some(Outbound::Close) | None => {
                    info!("{endpoint}: closed before the handshake completed");
                    return (None, "closed before open".to_string());
                }
            },
        }
    };

    info!("WebSocket session established: {endpoint}");
    if events.send(ShellEvent::Opened).is_err() {
        return (None, "event queue closed".to_string());
    }

    // ── Step 2: pump frames ───────────────────────────────────────────────────
    let (mut ws_tx, mut ws_rx) = ws_stream.split();

    // `false` once a Close frame has been sent; the outbound branch is then
    // disabled and we only read until the server finishes the handshake.
    let mut outbound_open = true;
    // Set when the server's Close frame arrives.
    let mut close_info: Option<(Option<u16>, String)> = None;

    loop {
        tokio::select! {
            frame = ws_rx.next() => match frame {
                Some(Ok(WsMessage::Text(text))) => {
                    if events.send(ShellEvent::Message(text)).is_err() {
                        debug!("{endpoint}: event queue closed; dropping connection");
                        break;
                    }
                }
                Some(Ok(WsMessage::Binary(data))) => {
                    warn!("{endpoint}: unexpected binary frame ({} bytes, ignored)", data.len());
                }
                Some(Ok(WsMessage::Ping(_) | WsMessage::Pong(_))) => {
                    // tungstenite answers pings on the next read/write.
                    debug!("{endpoint}: WebSocket ping/pong");
                }
                Some(Ok(WsMessage::Close(frame))) => {
                    debug!("{endpoint}: Close frame received: {frame:?}");
                    close_info = Some(match frame {
                        Some(f) => (Some(u16::from(f.code)), f.reason.into_owned()),
                        None => (None, String::new()),
                    });
                    // Keep reading: the next poll flushes our Close reply and
                    // then yields `None`.
                }
                Some(Ok(WsMessage::Frame(_))) => {
                    debug!("{endpoint}: raw frame (ignored)");
                }
                Some(Err(e)) => {
                    // After a close has started, a reset is the expected ending.
                    let closing = !outbound_open || close_info.is_some();
                    if !closing && !matches!(e, WsError::ConnectionClosed) {
                        warn!("{endpoint}: WebSocket error: {e}");
                        let _ = events.send(ShellEvent::Error(e.to_string()));
                    } else {
                        debug!("{endpoint}: stream ended during close: {e}");
                    }
                    break;
                }
                None => {
                    debug!("{endpoint}: WebSocket stream ended");
                    break;
                }
            },

            cmd = outbound.recv(), if outbound_open => match cmd {
                Some(Outbound::Text(text)) => {
                    if let Err(e) = ws_tx.send(WsMessage::Text(text)).await {
                        warn!("{endpoint}: send failed: {e}");
                        let _ = events.send(ShellEvent::Error(e.to_string()));
                        break;
                    }
                }
                Some(Outbound::Close) | None => {
                    outbound_open = false;
                    let frame = CloseFrame {
                        code: CloseCode::Normal,
                        reason: Cow::Borrowed(CLOSE_REASON),
                    };
                    if let Err(e) = ws_tx.send(WsMessage::Close(Some(frame))).await {
                        debug!("{endpoint}: Close frame not sent: {e}");
                        break;
                    }
                }
            },
        }
    }

    close_info.unwrap_or_else(|| (None, "connection ended".to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
