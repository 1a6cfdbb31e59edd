use std::sync::Mutex;

use cf_core::clipboard::ChangeStamp;
use twox_hash::xxh3::hash64;

/// Change stamps derived from clipboard content, for platforms that do not
/// expose a clipboard sequence number.
///
/// The stamp increases by one every time the observed content hash differs
/// from the previous one, so it is monotonic by construction.
///
/// Copying the same text again leaves the hash, and therefore the stamp,
/// unchanged. Unlike a real per-write sequence number, a repeated copy of
/// identical text is not forwarded a second time.
#[derive(Debug, Default)]
pub struct ContentStamp {
    state: Mutex<Option<(u64, u64)>>,
}

impl ContentStamp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current clipboard bytes. An empty clipboard counts as empty
    /// content, so a baseline exists even before anything is copied.
    pub fn observe(&self, content: Option<&[u8]>) -> ChangeStamp {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let hash = hash64(content.unwrap_or_default());
        let seq = match *guard {
            Some((last_hash, seq)) if last_hash == hash => seq,
            Some((_, seq)) => seq + 1,
            None => 1,
        };
        *guard = Some((hash, seq));
        ChangeStamp::new(seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_content_keeps_stamp() {
        let stamp = ContentStamp::new();

        let first = stamp.observe(Some(b"a"));
        let second = stamp.observe(Some(b"a"));

        assert_eq!(first, second);
    }

    #[test]
    fn new_content_bumps_stamp() {
        let stamp = ContentStamp::new();

        let first = stamp.observe(Some(b"a"));
        let second = stamp.observe(Some(b"b"));
        let third = stamp.observe(Some(b"a"));

        assert!(second > first);
        assert!(third > second);
    }

    #[test]
    fn empty_clipboard_still_gets_a_baseline() {
        let stamp = ContentStamp::new();

        let empty = stamp.observe(None);
        let copied = stamp.observe(Some(b"first copy"));

        assert!(stamp.observe(None) > copied);
        assert!(copied > empty);
    }

    #[test]
    fn repeated_empty_clipboard_is_unchanged() {
        let stamp = ContentStamp::new();

        assert_eq!(stamp.observe(None), stamp.observe(None));
    }
}
