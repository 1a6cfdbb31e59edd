use chrono::{DateTime, Utc};

/// A clipboard change detected by the watcher.
///
/// Created once per detected change, consumed by the send path, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipChangeEvent {
    pub observed_at: DateTime<Utc>,
    pub text: String,
}

impl ClipChangeEvent {
    pub fn new(observed_at: DateTime<Utc>, text: impl Into<String>) -> Self {
        Self {
            observed_at,
            text: text.into(),
        }
    }
}
