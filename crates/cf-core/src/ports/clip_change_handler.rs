//! Clipboard change handler port
//!
//! The watcher calls this for every detected change; the forwarding use case
//! implements it.

use async_trait::async_trait;

use crate::clipboard::ClipChangeEvent;

/// Callback handler for detected clipboard changes.
#[async_trait]
pub trait ClipChangeHandler: Send + Sync {
    async fn on_clip_changed(&self, event: ClipChangeEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_change_handler_is_object_safe() {
        fn assert_object_safe(_handler: Option<&dyn ClipChangeHandler>) {}
        assert_object_safe(None);
    }
}
