//! Clipboard watcher runtime module
//!
//! Long-running polling loop that observes the local clipboard and hands every
//! detected text change to a [`ClipChangeHandler`].
//!
//! ```text
//! ClipboardSourcePort (+ ReadGrantPort on Tier B)
//!      ↓
//! ClipboardReadStrategy   (cadence per tier)
//!      ↓
//! ClipboardWatcher        (this module, owns the ChangeTimestampTracker)
//!      ↓
//! ClipChangeHandler       (forwarding use case)
//! ```
//!
//! ## Lifecycle
//!
//! `watch()` runs on the calling task until the given `CancellationToken` is
//! cancelled. The token is checked while sleeping and after every read cycle;
//! a cycle already in flight (including the Tier B grant wait) completes
//! before the loop exits.
//!
//! ## Failure handling
//!
//! Read errors are logged and swallowed. The loop never exits because of a
//! clipboard error.

use std::sync::Arc;

use async_trait::async_trait;
use cf_core::clipboard::{ChangeTimestampTracker, ClipChangeEvent, PlatformTier};
use cf_core::ports::{
    ClipChangeHandler, ClipboardSourcePort, ClipboardWatcherPort, ClockPort, ReadGrantPort,
};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, Instrument};

use super::strategy::{
    ClipboardReadStrategy, ContinuousPollStrategy, FocusGatedPollStrategy, PollTimings,
};

pub struct ClipboardWatcher {
    source: Arc<dyn ClipboardSourcePort>,
    grant: Arc<dyn ReadGrantPort>,
    clock: Arc<dyn ClockPort>,
    timings: PollTimings,
}

impl ClipboardWatcher {
    pub fn new(
        source: Arc<dyn ClipboardSourcePort>,
        grant: Arc<dyn ReadGrantPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self::with_timings(source, grant, clock, PollTimings::default())
    }

    pub fn with_timings(
        source: Arc<dyn ClipboardSourcePort>,
        grant: Arc<dyn ReadGrantPort>,
        clock: Arc<dyn ClockPort>,
        timings: PollTimings,
    ) -> Self {
        Self {
            source,
            grant,
            clock,
            timings,
        }
    }

    /// Build the read strategy for `tier`.
    pub fn strategy_for(&self, tier: PlatformTier) -> Box<dyn ClipboardReadStrategy> {
        match tier {
            PlatformTier::Unrestricted => Box::new(ContinuousPollStrategy::new(
                self.source.clone(),
                self.timings.continuous_interval,
            )),
            PlatformTier::FocusGated => Box::new(FocusGatedPollStrategy::new(
                self.source.clone(),
                self.grant.clone(),
                self.timings.focus_gated_interval,
                self.timings.grant_settle,
            )),
        }
    }

    /// Drive `strategy` until `stop` is cancelled.
    pub async fn run_with(
        &self,
        strategy: &dyn ClipboardReadStrategy,
        handler: Arc<dyn ClipChangeHandler>,
        stop: CancellationToken,
    ) {
        let mut tracker = ChangeTimestampTracker::new();
        let interval = strategy.poll_interval();

        info!(
            tier = %strategy.tier(),
            interval_ms = interval.as_millis() as u64,
            "Clipboard watcher started"
        );

        loop {
            tokio::select! {
                biased;
                _ = stop.cancelled() => break,
                _ = sleep(interval) => {}
            }

            match strategy.read_cycle(&mut tracker).await {
                Ok(Some(text)) => {
                    debug!(len = text.len(), "Clipboard changed");
                    handler
                        .on_clip_changed(ClipChangeEvent::new(self.clock.now(), text))
                        .await;
                }
                Ok(None) => {}
                Err(err) => {
                    debug!(error = %err, "Clipboard read failed, retrying on next poll");
                }
            }

            if stop.is_cancelled() {
                break;
            }
        }

        info!("Clipboard watcher stopped");
    }
}

#[async_trait]
impl ClipboardWatcherPort for ClipboardWatcher {
    async fn watch(
        &self,
        tier: PlatformTier,
        handler: Arc<dyn ClipChangeHandler>,
        stop: CancellationToken,
    ) {
        let span = info_span!("runtime.clipboard_watcher", %tier);
        let strategy = self.strategy_for(tier);
        self.run_with(strategy.as_ref(), handler, stop)
            .instrument(span)
            .await
    }
}
