//! The single consumer of the event queue.
//!
//! Every producer pushes [`ShellEvent`]s into one unbounded `mpsc` channel;
//! this loop is the only receiver.  Events are therefore applied strictly in
//! arrival order, one at a time, and the shell needs no locking.
//!
//! The loop ends when:
//!
//! - the shell reports [`Flow::Stop`] (the transport closed), or
//! - a shutdown was requested and the transport did not confirm the close
//!   within `close_timeout`, or
//! - every producer has dropped its sender.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

use crate::application::shell::{Console, ConnectionShell, Flow, FrameSink};
use crate::domain::{ConnectionState, ShellEvent};

/// Drives `shell` from `events` until the session is over, then returns the
/// shell so the caller can inspect or drop it.
pub async fn run_event_loop<S: FrameSink, C: Console>(
    mut shell: ConnectionShell<S, C>,
    mut events: UnboundedReceiver<ShellEvent>,
    close_timeout: Duration,
) -> ConnectionShell<S, C> {
    // Set once a shutdown has been requested.
    let mut close_deadline: Option<Instant> = None;

    loop {
        let next = match close_deadline {
            Some(deadline) => match timeout_at(deadline, events.recv()).await {
                Ok(event) => event,
                Err(_) => {
                    warn!("server did not confirm the close within {close_timeout:?}");
                    break;
                }
            },
            None => events.recv().await,
        };

        let Some(event) = next else {
            debug!("event queue closed; stopping");
            break;
        };

        let requested_shutdown = matches!(event, ShellEvent::Shutdown);

        match shell.handle(event) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Stop) => break,
            // Handler failures are recoverable: log and keep going.
            Err(e) => warn!("{e}"),
        }

        if requested_shutdown && close_deadline.is_none() {
            if shell.state() == ConnectionState::Closed {
                break;
            }
            close_deadline = Some(Instant::now() + close_timeout);
        }
    }

    shell
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use socky_core::{KeyName, NamedKey};
    use tokio::sync::mpsc;

    use super::*;
    use crate::domain::{DisplayMode, Endpoint, KeyPress};
    use crate::infrastructure::console::mock::RecordingConsole;
    use crate::infrastructure::transport::mock::MockFrameSink;

    fn make_shell() -> (
        ConnectionShell<Arc<MockFrameSink>, Arc<RecordingConsole>>,
        Arc<MockFrameSink>,
        Arc<RecordingConsole>,
    ) {
        let sink = Arc::new(MockFrameSink::new());
        let console = Arc::new(RecordingConsole::new());
        let shell = ConnectionShell::new(
            Endpoint::default(),
            DisplayMode::Log,
            Arc::clone(&sink),
            Arc::clone(&console),
        );
        (shell, sink, console)
    }

    fn key(name: NamedKey) -> ShellEvent {
        ShellEvent::KeyDown(KeyPress::plain(KeyName::Named(name)))
    }

    #[tokio::test]
    async fn test_events_are_applied_in_queue_order() {
        // Arrange
        let (shell, sink, console) = make_shell();
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(ShellEvent::Opened).unwrap();
        tx.send(key(NamedKey::ArrowUp)).unwrap();
        tx.send(ShellEvent::Message(r#"{"gridString":"g"}"#.into()))
            .unwrap();
        tx.send(key(NamedKey::ArrowLeft)).unwrap();
        drop(tx);

        // Act
        let shell = run_event_loop(shell, rx, Duration::from_secs(1)).await;

        // Assert
        assert_eq!(
            sink.frames(),
            vec!["ArrowUp".to_string(), "ArrowLeft".to_string()]
        );
        assert_eq!(shell.frames_sent(), 2);
        let lines = console.lines();
        assert_eq!(lines[0], "connected to server");
        assert!(lines[1].contains("ArrowUp"));
        assert_eq!(lines[2], r#"{"gridString":"g"}"#);
        assert_eq!(lines[3], "g");
    }

    #[tokio::test]
    async fn test_decode_failure_does_not_stop_the_loop() {
        let (shell, sink, _) = make_shell();
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(ShellEvent::Opened).unwrap();
        tx.send(ShellEvent::Message("not json".into())).unwrap();
        tx.send(key(NamedKey::Enter)).unwrap();
        drop(tx);

        run_event_loop(shell, rx, Duration::from_secs(1)).await;

        assert_eq!(sink.frames(), vec!["Enter".to_string()]);
    }

    #[tokio::test]
    async fn test_key_before_open_is_dropped_and_loop_continues() {
        let (shell, sink, _) = make_shell();
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(key(NamedKey::ArrowUp)).unwrap();
        tx.send(ShellEvent::Opened).unwrap();
        tx.send(key(NamedKey::ArrowDown)).unwrap();
        drop(tx);

        run_event_loop(shell, rx, Duration::from_secs(1)).await;

        assert_eq!(sink.frames(), vec!["ArrowDown".to_string()]);
    }

    #[tokio::test]
    async fn test_closed_event_ends_loop_before_later_events() {
        let (shell, sink, _) = make_shell();
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(ShellEvent::Opened).unwrap();
        tx.send(ShellEvent::Closed {
            code: Some(1000),
            reason: String::new(),
        })
        .unwrap();
        tx.send(key(NamedKey::ArrowUp)).unwrap();

        // `tx` stays alive: the loop must stop on `Closed` alone.
        let shell = run_event_loop(shell, rx, Duration::from_secs(1)).await;

        assert_eq!(shell.state(), ConnectionState::Closed);
        assert!(sink.frames().is_empty());
        drop(tx);
    }

    #[tokio::test]
    async fn test_shutdown_waits_for_close_then_times_out() {
        // Arrange: the transport never confirms the close
        let (shell, sink, _) = make_shell();
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(ShellEvent::Opened).unwrap();
        tx.send(ShellEvent::Shutdown).unwrap();

        // Act
        let shell = run_event_loop(shell, rx, Duration::from_millis(50)).await;

        // Assert
        assert_eq!(sink.close_count(), 1);
        assert_eq!(shell.state(), ConnectionState::Closing);
        drop(tx);
    }

    #[tokio::test]
    async fn test_shutdown_then_closed_ends_cleanly() {
        let (shell, sink, _) = make_shell();
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(ShellEvent::Opened).unwrap();
        tx.send(ShellEvent::Shutdown).unwrap();
        tx.send(ShellEvent::Closed {
            code: Some(1000),
            reason: "closing from client".into(),
        })
        .unwrap();

        let shell = run_event_loop(shell, rx, Duration::from_secs(5)).await;

        assert_eq!(shell.state(), ConnectionState::Closed);
        assert_eq!(sink.close_count(), 1);
        assert!(sink.frames().is_empty());
        drop(tx);
    }
}
