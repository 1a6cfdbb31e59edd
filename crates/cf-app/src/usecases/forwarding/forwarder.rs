use std::sync::Arc;

use async_trait::async_trait;
use cf_core::clipboard::ClipChangeEvent;
use cf_core::network::OutboundEnvelope;
use cf_core::ports::{ClipChangeHandler, ConnectionPort, SendError};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::status::ForwardingStatus;

/// Turns detected clipboard changes into `clip` envelopes.
///
/// Forwarding is best-effort: a clip that cannot be sent right now is dropped
/// and counted, never queued.
pub struct ClipForwarder {
    connection: Arc<dyn ConnectionPort>,
    status: Arc<watch::Sender<ForwardingStatus>>,
}

impl ClipForwarder {
    pub fn new(
        connection: Arc<dyn ConnectionPort>,
        status: Arc<watch::Sender<ForwardingStatus>>,
    ) -> Self {
        Self { connection, status }
    }
}

#[async_trait]
impl ClipChangeHandler for ClipForwarder {
    async fn on_clip_changed(&self, event: ClipChangeEvent) {
        let len = event.text.len();
        let envelope = OutboundEnvelope::from(event);
        let kind = envelope.kind();

        match self.connection.send(&envelope) {
            Ok(()) => {
                debug!(kind, len, "Clip forwarded");
                self.status.send_modify(|s| s.forwarded += 1);
            }
            Err(SendError::NotConnected(state)) => {
                debug!(kind, len, %state, "Connection not open, clip dropped");
                self.status.send_modify(|s| s.dropped += 1);
            }
            Err(err) => {
                warn!(kind, error = %err, "Clip dropped");
                self.status.send_modify(|s| s.dropped += 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::network::{ConnectionState, Endpoint};
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        pub Connection {}

        impl ConnectionPort for Connection {
            fn connect(&self, endpoint: &Endpoint);
            fn send(&self, envelope: &OutboundEnvelope) -> Result<(), SendError>;
            fn close(&self);
            fn state(&self) -> ConnectionState;
        }
    }

    fn status() -> Arc<watch::Sender<ForwardingStatus>> {
        Arc::new(watch::channel(ForwardingStatus::default()).0)
    }

    #[tokio::test]
    async fn test_clip_is_sent_as_clip_envelope() {
        let mut connection = MockConnection::new();
        connection
            .expect_send()
            .with(eq(OutboundEnvelope::clip("hello world")))
            .times(1)
            .returning(|_| Ok(()));
        let status = status();
        let forwarder = ClipForwarder::new(Arc::new(connection), status.clone());

        forwarder
            .on_clip_changed(ClipChangeEvent::new(Utc::now(), "hello world"))
            .await;

        assert_eq!(status.borrow().forwarded, 1);
        assert_eq!(status.borrow().dropped, 0);
    }

    #[tokio::test]
    async fn test_not_connected_drops_and_counts() {
        let mut connection = MockConnection::new();
        connection
            .expect_send()
            .times(2)
            .returning(|_| Err(SendError::NotConnected(ConnectionState::Connecting)));
        let status = status();
        let forwarder = ClipForwarder::new(Arc::new(connection), status.clone());

        forwarder
            .on_clip_changed(ClipChangeEvent::new(Utc::now(), "a"))
            .await;
        forwarder
            .on_clip_changed(ClipChangeEvent::new(Utc::now(), "b"))
            .await;

        assert_eq!(status.borrow().dropped, 2);
        assert_eq!(status.borrow().forwarded, 0);
    }
}
