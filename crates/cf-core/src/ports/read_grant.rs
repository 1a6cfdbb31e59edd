use async_trait::async_trait;

use super::ClipboardReadError;

/// Obtains the transient focus grant restricted platforms require before a
/// background process may read the clipboard.
///
/// The core only sequences `acquire` / `release`; how the grant is obtained is
/// up to the adapter.
#[async_trait]
pub trait ReadGrantPort: Send + Sync {
    async fn acquire(&self) -> Result<(), ClipboardReadError>;

    /// Must be safe to call after a failed `acquire`.
    async fn release(&self);
}
