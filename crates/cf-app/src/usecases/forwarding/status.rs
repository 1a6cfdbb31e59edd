use std::fmt;

/// Snapshot of the forwarding session, published on a `watch` channel.
///
/// Updated on every connection Open/Failure/Closed and on every forwarded or
/// dropped clip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardingStatus {
    pub active: bool,
    pub connected: bool,
    pub last_error: Option<String>,
    /// Preview of the last inbound message.
    pub last_message: Option<String>,
    pub forwarded: u64,
    /// Clips dropped because the connection was not open.
    pub dropped: u64,
}

impl ForwardingStatus {
    pub(super) fn started() -> Self {
        Self {
            active: true,
            ..Self::default()
        }
    }
}

impl fmt::Display for ForwardingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match (self.active, self.connected) {
            (false, _) => "stopped",
            (true, true) => "forwarding",
            (true, false) => "waiting for connection",
        };
        write!(
            f,
            "{state} (forwarded: {}, dropped: {})",
            self.forwarded, self.dropped
        )?;
        if let Some(error) = &self.last_error {
            write!(f, ", last error: {error}")?;
        }
        if let Some(message) = &self.last_message {
            write!(f, ", last message: {message}")?;
        }
        Ok(())
    }
}
