use tokio::sync::mpsc;

/// Raw inbound payload, passed through without interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    Text(String),
    Binary(Vec<u8>),
}

impl InboundMessage {
    pub fn len(&self) -> usize {
        match self {
            InboundMessage::Text(text) => text.len(),
            InboundMessage::Binary(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short human readable form for logs and status displays.
    pub fn preview(&self) -> String {
        match self {
            InboundMessage::Text(text) => text.clone(),
            InboundMessage::Binary(bytes) => format!("<{} bytes>", bytes.len()),
        }
    }
}

/// Lifecycle events emitted by a connection, delivered in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// The connection is open. The hello envelope is written next, ahead of
    /// anything passed to `send`.
    Open,
    /// Data arrived from the listener.
    Message(InboundMessage),
    /// A normal shutdown started, initiated by either side.
    Closing { code: u16, reason: String },
    /// The connection is fully closed after a normal shutdown.
    Closed { code: u16, reason: String },
    /// The connection terminated abnormally.
    Failure { error: String },
}

pub type ConnectionEventSender = mpsc::UnboundedSender<ConnectionEvent>;
pub type ConnectionEventReceiver = mpsc::UnboundedReceiver<ConnectionEvent>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_preview_shows_length_only() {
        let msg = InboundMessage::Binary(vec![0, 1, 2]);
        assert_eq!(msg.preview(), "<3 bytes>");
        assert_eq!(msg.len(), 3);
    }
}
