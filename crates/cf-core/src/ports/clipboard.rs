use async_trait::async_trait;

use crate::clipboard::ChangeStamp;

/// Clipboard access failures. All of them are transient from the watcher's
/// point of view: the cycle becomes a no-op and the next poll retries.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ClipboardReadError {
    #[error("Clipboard read denied: {0}")]
    Denied(String),

    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard platform error: {0}")]
    Platform(String),
}

/// Read access to the system clipboard.
#[async_trait]
pub trait ClipboardSourcePort: Send + Sync {
    /// Current change stamp, or `None` when the clipboard is empty.
    async fn change_stamp(&self) -> Result<Option<ChangeStamp>, ClipboardReadError>;

    /// Current clipboard text, or `None` when it holds no text.
    async fn read_text(&self) -> Result<Option<String>, ClipboardReadError>;
}
