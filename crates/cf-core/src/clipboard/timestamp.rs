//! Clipboard change timestamps and the tracker that compares them.
//!
//! The platform attaches a monotonically increasing stamp to every clipboard
//! write. Comparing stamps lets the watcher detect new content without reading
//! (and re-sending) unchanged text.

use serde::{Deserialize, Serialize};

/// Opaque, monotonic clipboard change timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChangeStamp(u64);

impl ChangeStamp {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ChangeStamp {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Result of feeding one stamp into the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampObservation {
    /// First stamp seen; recorded as the baseline, nothing to forward.
    Baseline,
    /// Stamp moved forward since the last observation.
    Changed,
    /// Same stamp as before (or an out-of-order older one).
    Unchanged,
}

/// Remembers the last observed clipboard change stamp.
///
/// Owned by exactly one watcher loop. `last_seen` never decreases.
#[derive(Debug, Default)]
pub struct ChangeTimestampTracker {
    last_seen: Option<ChangeStamp>,
}

impl ChangeTimestampTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_seen(&self) -> Option<ChangeStamp> {
        self.last_seen
    }

    /// Classify `stamp` against the last seen one without recording it.
    ///
    /// Only a stamp greater than `last_seen` counts as a change. Stamps are
    /// monotonic, so this matches a plain inequality check for well-behaved
    /// sources, and an out-of-order older stamp is not mistaken for new content.
    pub fn classify(&self, stamp: ChangeStamp) -> StampObservation {
        match self.last_seen {
            None => StampObservation::Baseline,
            Some(last) if stamp > last => StampObservation::Changed,
            Some(_) => StampObservation::Unchanged,
        }
    }

    /// Record `stamp` as seen. Older stamps are ignored.
    pub fn record(&mut self, stamp: ChangeStamp) {
        if self.last_seen.map_or(true, |last| stamp > last) {
            self.last_seen = Some(stamp);
        }
    }

    /// Classify and record in one step.
    pub fn observe(&mut self, stamp: ChangeStamp) -> StampObservation {
        let observation = self.classify(stamp);
        self.record(stamp);
        observation
    }
}
