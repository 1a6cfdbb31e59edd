//! Clipboard read strategies, one per platform tier.
//!
//! Both strategies share the same change-detection step ([`detect_change`]);
//! they differ in cadence and in what has to happen around the read.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cf_core::clipboard::{ChangeTimestampTracker, PlatformTier, StampObservation};
use cf_core::ports::{ClipboardReadError, ClipboardSourcePort, ReadGrantPort};
use tokio::time::sleep;
use tracing::{debug, trace};

/// Polling cadence for both tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTimings {
    /// Tier A poll interval.
    pub continuous_interval: Duration,
    /// Tier B poll interval.
    pub focus_gated_interval: Duration,
    /// Tier B wait between acquiring the grant and reading.
    pub grant_settle: Duration,
}

impl Default for PollTimings {
    fn default() -> Self {
        Self {
            continuous_interval: Duration::from_millis(100),
            focus_gated_interval: Duration::from_millis(4000),
            grant_settle: Duration::from_millis(1200),
        }
    }
}

#[async_trait]
pub trait ClipboardReadStrategy: Send + Sync {
    fn tier(&self) -> PlatformTier;

    /// Sleep before each read cycle.
    fn poll_interval(&self) -> Duration;

    /// Run one read cycle. Returns the text to forward, if the clipboard
    /// changed since the last cycle.
    async fn read_cycle(
        &self,
        tracker: &mut ChangeTimestampTracker,
    ) -> Result<Option<String>, ClipboardReadError>;
}

/// Compare the current change stamp with the tracker and read the text only
/// when it moved.
///
/// The first stamp becomes the baseline and is never forwarded. A failed text
/// read leaves the tracker untouched so the next cycle tries again.
pub async fn detect_change(
    source: &dyn ClipboardSourcePort,
    tracker: &mut ChangeTimestampTracker,
) -> Result<Option<String>, ClipboardReadError> {
    let Some(stamp) = source.change_stamp().await? else {
        trace!("clipboard empty");
        return Ok(None);
    };

    match tracker.classify(stamp) {
        StampObservation::Baseline => {
            debug!(stamp = stamp.value(), "clipboard baseline established");
            tracker.record(stamp);
            Ok(None)
        }
        StampObservation::Unchanged => {
            if tracker.last_seen().is_some_and(|last| stamp < last) {
                debug!(stamp = stamp.value(), "ignoring out-of-order clipboard stamp");
            }
            Ok(None)
        }
        StampObservation::Changed => {
            let text = source.read_text().await?;
            tracker.record(stamp);
            Ok(text.filter(|t| !t.is_empty()))
        }
    }
}

/// Tier A: read directly, every 100 ms.
pub struct ContinuousPollStrategy {
    source: Arc<dyn ClipboardSourcePort>,
    interval: Duration,
}

impl ContinuousPollStrategy {
    pub fn new(source: Arc<dyn ClipboardSourcePort>, interval: Duration) -> Self {
        Self { source, interval }
    }
}

#[async_trait]
impl ClipboardReadStrategy for ContinuousPollStrategy {
    fn tier(&self) -> PlatformTier {
        PlatformTier::Unrestricted
    }

    fn poll_interval(&self) -> Duration {
        self.interval
    }

    async fn read_cycle(
        &self,
        tracker: &mut ChangeTimestampTracker,
    ) -> Result<Option<String>, ClipboardReadError> {
        detect_change(self.source.as_ref(), tracker).await
    }
}

/// Tier B: every 4000 ms acquire the focus grant, wait 1200 ms for it to take
/// effect, read, then release.
///
/// Faster focus cycling disrupts the user and races the platform's own focus
/// arbitration.
pub struct FocusGatedPollStrategy {
    source: Arc<dyn ClipboardSourcePort>,
    grant: Arc<dyn ReadGrantPort>,
    interval: Duration,
    grant_settle: Duration,
}

impl FocusGatedPollStrategy {
    pub fn new(
        source: Arc<dyn ClipboardSourcePort>,
        grant: Arc<dyn ReadGrantPort>,
        interval: Duration,
        grant_settle: Duration,
    ) -> Self {
        Self {
            source,
            grant,
            interval,
            grant_settle,
        }
    }
}

#[async_trait]
impl ClipboardReadStrategy for FocusGatedPollStrategy {
    fn tier(&self) -> PlatformTier {
        PlatformTier::FocusGated
    }

    fn poll_interval(&self) -> Duration {
        self.interval
    }

    async fn read_cycle(
        &self,
        tracker: &mut ChangeTimestampTracker,
    ) -> Result<Option<String>, ClipboardReadError> {
        if let Err(err) = self.grant.acquire().await {
            self.grant.release().await;
            return Err(err);
        }

        sleep(self.grant_settle).await;
        let result = detect_change(self.source.as_ref(), tracker).await;
        self.grant.release().await;
        result
    }
}
