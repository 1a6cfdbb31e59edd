use std::sync::Arc;

use cf_core::network::{ConnectionEvent, ConnectionEventReceiver, InboundMessage};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::status::ForwardingStatus;

/// Drain connection events in order until the connection drops its sender.
pub(super) async fn pump_events(
    mut events: ConnectionEventReceiver,
    status: Arc<watch::Sender<ForwardingStatus>>,
) {
    while let Some(event) = events.recv().await {
        apply_event(&status, event);
    }
    debug!("Connection event stream ended");
}

fn apply_event(status: &watch::Sender<ForwardingStatus>, event: ConnectionEvent) {
    match event {
        ConnectionEvent::Open => {
            info!("Connected to listener");
            status.send_modify(|s| {
                s.connected = true;
                s.last_error = None;
            });
        }
        ConnectionEvent::Message(message) => {
            match &message {
                InboundMessage::Text(text) => info!(message = %text, "Message from listener"),
                InboundMessage::Binary(bytes) => {
                    info!(len = bytes.len(), "Binary message from listener")
                }
            }
            status.send_modify(|s| s.last_message = Some(message.preview()));
        }
        ConnectionEvent::Closing { code, reason } => {
            debug!(code, reason = %reason, "Connection closing");
        }
        ConnectionEvent::Closed { code, reason } => {
            info!(code, reason = %reason, "Connection closed");
            status.send_modify(|s| s.connected = false);
        }
        ConnectionEvent::Failure { error } => {
            warn!(error = %error, "Connection failure");
            status.send_modify(|s| {
                s.connected = false;
                s.last_error = Some(error);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_status_follows_connection_lifecycle() {
        let (tx, rx) = mpsc::unbounded_channel();
        let status = Arc::new(watch::channel(ForwardingStatus::started()).0);
        let mut updates = status.subscribe();

        tx.send(ConnectionEvent::Failure {
            error: "refused".to_string(),
        })
        .unwrap();
        tx.send(ConnectionEvent::Open).unwrap();
        tx.send(ConnectionEvent::Message(InboundMessage::Binary(vec![0; 4])))
            .unwrap();
        drop(tx);

        pump_events(rx, status.clone()).await;

        let current = updates.borrow_and_update().clone();
        assert!(current.connected);
        assert_eq!(current.last_error, None);
        assert_eq!(current.last_message.as_deref(), Some("<4 bytes>"));
    }

    #[test]
    fn test_failure_records_error_and_disconnects() {
        let (status, _rx) = watch::channel(ForwardingStatus::started());
        apply_event(&status, ConnectionEvent::Open);
        apply_event(
            &status,
            ConnectionEvent::Failure {
                error: "reset".to_string(),
            },
        );

        let current = status.borrow();
        assert!(!current.connected);
        assert_eq!(current.last_error.as_deref(), Some("reset"));
    }

    #[test]
    fn test_closed_disconnects_and_keeps_last_error() {
        let (status, _rx) = watch::channel(ForwardingStatus::started());
        apply_event(
            &status,
            ConnectionEvent::Failure {
                error: "reset".to_string(),
            },
        );
        apply_event(
            &status,
            ConnectionEvent::Closed {
                code: 1000,
                reason: String::new(),
            },
        );

        let current = status.borrow();
        assert!(!current.connected);
        assert_eq!(current.last_error.as_deref(), Some("reset"));
    }
}
