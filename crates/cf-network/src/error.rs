use std::time::Duration;

use tokio_tungstenite::tungstenite;

/// Abnormal connection termination. Carried as text in
/// `ConnectionEvent::Failure`.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("Failed to connect: {0}")]
    Connect(String),

    #[error("Connect timed out after {0:?}")]
    Timeout(Duration),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl From<tungstenite::Error> for ConnectionError {
    fn from(err: tungstenite::Error) -> Self {
        match err {
            tungstenite::Error::Protocol(_)
            | tungstenite::Error::Capacity(_)
            | tungstenite::Error::Utf8 => ConnectionError::Protocol(err.to_string()),
            other => ConnectionError::Transport(other.to_string()),
        }
    }
}
