use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use cf_core::clipboard::ChangeStamp;
use cf_core::ports::{ClipboardReadError, ClipboardSourcePort};
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat};
use tokio::task::spawn_blocking;

use super::ContentStamp;

/// System clipboard adapter using clipboard-rs.
///
/// Change stamps come from the OS clipboard sequence number on Windows and
/// from [`ContentStamp`] everywhere else.
pub struct LocalClipboard {
    inner: Arc<Mutex<ClipboardContext>>,
    #[cfg_attr(windows, allow(dead_code))]
    stamp: Arc<ContentStamp>,
}

impl LocalClipboard {
    pub fn new() -> Result<Self> {
        let context = ClipboardContext::new()
            .map_err(|e| anyhow::anyhow!("Failed to create clipboard context: {}", e))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
            stamp: Arc::new(ContentStamp::new()),
        })
    }

    async fn with_context<T, F>(&self, f: F) -> Result<T, ClipboardReadError>
    where
        T: Send + 'static,
        F: FnOnce(&ClipboardContext) -> Result<T, ClipboardReadError> + Send + 'static,
    {
        let inner = self.inner.clone();
        spawn_blocking(move || {
            let guard = inner
                .lock()
                .map_err(|e| ClipboardReadError::Unavailable(format!("clipboard lock poisoned: {e}")))?;
            f(&guard)
        })
        .await
        .map_err(|e| ClipboardReadError::Platform(format!("task join error: {e}")))?
    }
}

fn read_text_from(ctx: &ClipboardContext) -> Result<Option<String>, ClipboardReadError> {
    if !ctx.has(ContentFormat::Text) {
        return Ok(None);
    }
    ctx.get_text()
        .map(Some)
        .map_err(|e| ClipboardReadError::Denied(e.to_string()))
}

#[async_trait]
impl ClipboardSourcePort for LocalClipboard {
    #[cfg(windows)]
    async fn change_stamp(&self) -> Result<Option<ChangeStamp>, ClipboardReadError> {
        Ok(clipboard_win::raw::seq_num().map(|n| ChangeStamp::new(u64::from(n.get()))))
    }

    #[cfg(not(windows))]
    async fn change_stamp(&self) -> Result<Option<ChangeStamp>, ClipboardReadError> {
        let stamp = self.stamp.clone();
        self.with_context(move |ctx| {
            let text = read_text_from(ctx)?;
            Ok(Some(stamp.observe(text.as_deref().map(str::as_bytes))))
        })
        .await
    }

    async fn read_text(&self) -> Result<Option<String>, ClipboardReadError> {
        self.with_context(read_text_from).await
    }
}
