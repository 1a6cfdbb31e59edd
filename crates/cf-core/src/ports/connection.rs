use std::sync::Arc;

use crate::network::{ConnectionEventReceiver, ConnectionState, Endpoint, OutboundEnvelope};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SendError {
    #[error("Connection is not open (state: {0})")]
    NotConnected(ConnectionState),

    #[error("Failed to encode envelope: {0}")]
    Encode(String),
}

/// One logical persistent connection.
///
/// All methods return immediately; I/O happens on the adapter's own tasks and
/// results surface as `ConnectionEvent`s.
pub trait ConnectionPort: Send + Sync {
    /// Start connecting. No effect beyond clearing a pending retry timer when
    /// already `Connecting` or `Open`.
    fn connect(&self, endpoint: &Endpoint);

    /// Write an envelope. Fails fast with `NotConnected` unless `Open`; nothing
    /// is buffered for later.
    fn send(&self, envelope: &OutboundEnvelope) -> Result<(), SendError>;

    /// User-requested shutdown. Disables auto-reconnect for this client.
    fn close(&self);

    fn state(&self) -> ConnectionState;
}

/// Creates a fresh connection (and its event stream) per forwarding session.
pub trait ConnectionFactoryPort: Send + Sync {
    fn create(&self) -> (Arc<dyn ConnectionPort>, ConnectionEventReceiver);
}
