use std::sync::Arc;
use std::time::Duration;

use cf_core::clipboard::PlatformTier;
use cf_core::network::Endpoint;
use cf_core::ports::{ClipboardWatcherPort, ConnectionFactoryPort, ConnectionPort};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};

use super::error::{ForwardingError, StopOutcome};
use super::event_pump::pump_events;
use super::forwarder::ClipForwarder;
use super::status::ForwardingStatus;

/// Upper bound for the connection to report `Closed` after `close()`.
const EVENT_DRAIN_TIMEOUT: Duration = Duration::from_secs(4);

/// Dependencies of [`ForwardingController`].
pub struct ForwardingDeps {
    pub watcher: Arc<dyn ClipboardWatcherPort>,
    pub connections: Arc<dyn ConnectionFactoryPort>,
}

/// A running watcher/connection pair.
struct ForwardingSession {
    connection: Arc<dyn ConnectionPort>,
    stop: CancellationToken,
    watcher_task: JoinHandle<()>,
    event_task: JoinHandle<()>,
}

/// Single entry and exit point of forwarding.
///
/// ## Behavior
/// - At most one session is live. Starting while active is rejected with
///   [`ForwardingError::AlreadyActive`] and leaves the running session alone.
/// - Stopping while inactive is a no-op ([`StopOutcome::NotActive`]).
/// - The watcher and the event pump run on their own tokio tasks, owned by the
///   session.
pub struct ForwardingController {
    watcher: Arc<dyn ClipboardWatcherPort>,
    connections: Arc<dyn ConnectionFactoryPort>,
    status: Arc<watch::Sender<ForwardingStatus>>,
    session: Mutex<Option<ForwardingSession>>,
}

impl ForwardingController {
    pub fn new(
        watcher: Arc<dyn ClipboardWatcherPort>,
        connections: Arc<dyn ConnectionFactoryPort>,
    ) -> Self {
        let (status, _) = watch::channel(ForwardingStatus::default());
        Self {
            watcher,
            connections,
            status: Arc::new(status),
            session: Mutex::new(None),
        }
    }

    pub fn from_deps(deps: ForwardingDeps) -> Self {
        let ForwardingDeps {
            watcher,
            connections,
        } = deps;

        Self::new(watcher, connections)
    }

    /// Connect to `endpoint` and start forwarding clipboard changes.
    pub async fn start_forwarding(
        &self,
        endpoint: Endpoint,
        tier: PlatformTier,
    ) -> Result<(), ForwardingError> {
        let span = info_span!("usecase.start_forwarding.execute", endpoint = %endpoint, %tier);

        async {
            let mut session = self.session.lock().await;
            if session.is_some() {
                warn!("Forwarding already active, start ignored");
                return Err(ForwardingError::AlreadyActive);
            }

            self.status.send_replace(ForwardingStatus::started());

            let (connection, events) = self.connections.create();
            let event_task = tokio::spawn(pump_events(events, self.status.clone()));
            connection.connect(&endpoint);

            let stop = CancellationToken::new();
            let handler = Arc::new(ClipForwarder::new(connection.clone(), self.status.clone()));
            let watcher = self.watcher.clone();
            let watcher_stop = stop.clone();
            let watcher_task = tokio::spawn(
                async move { watcher.watch(tier, handler, watcher_stop).await }.in_current_span(),
            );

            *session = Some(ForwardingSession {
                connection,
                stop,
                watcher_task,
                event_task,
            });

            info!("Forwarding started");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Stop the watcher and close the connection.
    ///
    /// Waits for the watcher loop to exit, which is bounded by one poll cycle.
    pub async fn stop_forwarding(&self) -> StopOutcome {
        let span = info_span!("usecase.stop_forwarding.execute");

        async {
            let mut session = self.session.lock().await;
            let Some(ForwardingSession {
                connection,
                stop,
                watcher_task,
                mut event_task,
            }) = session.take()
            else {
                debug!("Forwarding not active, stop ignored");
                return StopOutcome::NotActive;
            };

            info!("Stopping forwarding");
            stop.cancel();
            connection.close();

            if let Err(err) = watcher_task.await {
                warn!(error = %err, "Clipboard watcher task ended abnormally");
            }
            drop(connection);

            if tokio::time::timeout(EVENT_DRAIN_TIMEOUT, &mut event_task)
                .await
                .is_err()
            {
                debug!("Connection did not finish closing in time");
                event_task.abort();
            }

            self.status.send_modify(|s| {
                s.active = false;
                s.connected = false;
            });

            info!("Forwarding stopped");
            StopOutcome::Stopped
        }
        .instrument(span)
        .await
    }

    pub fn is_active(&self) -> bool {
        self.status.borrow().active
    }

    pub fn status(&self) -> ForwardingStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<ForwardingStatus> {
        self.status.subscribe()
    }
}
