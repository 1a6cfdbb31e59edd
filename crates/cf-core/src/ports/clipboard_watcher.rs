use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::ClipChangeHandler;
use crate::clipboard::PlatformTier;

/// Runs the clipboard polling loop.
///
/// # Behavior
/// - `watch` runs on the calling task until `stop` is cancelled.
/// - Each call starts from a fresh baseline: the clipboard content present when
///   the loop starts is never delivered.
/// - Cancellation is honoured at loop check points only; a read cycle already
///   in flight completes first.
#[async_trait]
pub trait ClipboardWatcherPort: Send + Sync {
    async fn watch(
        &self,
        tier: PlatformTier,
        handler: Arc<dyn ClipChangeHandler>,
        stop: CancellationToken,
    );
}
