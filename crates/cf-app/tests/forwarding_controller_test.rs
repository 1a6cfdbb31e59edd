use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use cf_app::{ForwardingController, ForwardingDeps, ForwardingError, ForwardingStatus, StopOutcome};
use cf_core::clipboard::{ClipChangeEvent, PlatformTier};
use cf_core::network::{
    ConnectionEvent, ConnectionEventReceiver, ConnectionEventSender, ConnectionState, Endpoint,
    OutboundEnvelope,
};
use cf_core::ports::{
    ClipChangeHandler, ClipboardWatcherPort, ConnectionFactoryPort, ConnectionPort, SendError,
};

/// Connection whose lifecycle is driven by the test.
struct FakeConnection {
    state: Mutex<ConnectionState>,
    events: Mutex<Option<ConnectionEventSender>>,
    sent: Mutex<Vec<OutboundEnvelope>>,
    connects: AtomicUsize,
    closes: AtomicUsize,
}

impl FakeConnection {
    fn new(events: ConnectionEventSender) -> Self {
        Self {
            state: Mutex::new(ConnectionState::Disconnected),
            events: Mutex::new(Some(events)),
            sent: Mutex::new(Vec::new()),
            connects: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
        }
    }

    fn emit(&self, event: ConnectionEvent) {
        if let Some(tx) = self.events.lock().unwrap().as_ref() {
            let _ = tx.send(event);
        }
    }

    fn open(&self) {
        *self.state.lock().unwrap() = ConnectionState::Open;
        self.emit(ConnectionEvent::Open);
    }

    fn fail(&self, error: &str) {
        *self.state.lock().unwrap() = ConnectionState::Disconnected;
        self.emit(ConnectionEvent::Failure {
            error: error.to_string(),
        });
    }

    fn sent_texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|envelope| match envelope {
                OutboundEnvelope::Clip(clip) => clip.text.clone(),
                other => panic!("unexpected envelope {other:?}"),
            })
            .collect()
    }
}

impl ConnectionPort for FakeConnection {
    fn connect(&self, _endpoint: &Endpoint) {
        self.connects.fetch_add(1, Ordering::SeqCst);
        *self.state.lock().unwrap() = ConnectionState::Connecting;
    }

    fn send(&self, envelope: &OutboundEnvelope) -> Result<(), SendError> {
        let state = *self.state.lock().unwrap();
        if state != ConnectionState::Open {
            return Err(SendError::NotConnected(state));
        }
        self.sent.lock().unwrap().push(envelope.clone());
        Ok(())
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
        *self.state.lock().unwrap() = ConnectionState::Disconnected;
        self.emit(ConnectionEvent::Closed {
            code: 1000,
            reason: "closed by client".to_string(),
        });
        self.events.lock().unwrap().take();
    }

    fn state(&self) -> ConnectionState {
        *self.state.lock().unwrap()
    }
}

#[derive(Default)]
struct FakeConnectionFactory {
    created: Mutex<Vec<Arc<FakeConnection>>>,
}

impl FakeConnectionFactory {
    fn latest(&self) -> Arc<FakeConnection> {
        self.created.lock().unwrap().last().cloned().unwrap()
    }

    fn count(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

impl ConnectionFactoryPort for FakeConnectionFactory {
    fn create(&self) -> (Arc<dyn ConnectionPort>, ConnectionEventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection = Arc::new(FakeConnection::new(tx));
        self.created.lock().unwrap().push(connection.clone());
        (connection, rx)
    }
}

/// Watcher that forwards whatever the test injects until stopped.
struct FakeWatcher {
    clips: tokio::sync::Mutex<mpsc::UnboundedReceiver<String>>,
    watch_calls: AtomicUsize,
    running: AtomicBool,
}

impl FakeWatcher {
    fn new() -> (Self, mpsc::UnboundedSender<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                clips: tokio::sync::Mutex::new(rx),
                watch_calls: AtomicUsize::new(0),
                running: AtomicBool::new(false),
            },
            tx,
        )
    }
}

#[async_trait]
impl ClipboardWatcherPort for FakeWatcher {
    async fn watch(
        &self,
        _tier: PlatformTier,
        handler: Arc<dyn ClipChangeHandler>,
        stop: CancellationToken,
    ) {
        self.watch_calls.fetch_add(1, Ordering::SeqCst);
        self.running.store(true, Ordering::SeqCst);
        let mut clips = self.clips.lock().await;
        loop {
            tokio::select! {
                _ = stop.cancelled() => break,
                Some(text) = clips.recv() => {
                    handler.on_clip_changed(ClipChangeEvent::new(Utc::now(), text)).await;
                }
            }
        }
        self.running.store(false, Ordering::SeqCst);
    }
}

struct Harness {
    controller: ForwardingController,
    factory: Arc<FakeConnectionFactory>,
    watcher: Arc<FakeWatcher>,
    clips: mpsc::UnboundedSender<String>,
}

fn harness() -> Harness {
    let factory = Arc::new(FakeConnectionFactory::default());
    let (watcher, clips) = FakeWatcher::new();
    let watcher = Arc::new(watcher);
    let controller = ForwardingController::from_deps(ForwardingDeps {
        watcher: watcher.clone(),
        connections: factory.clone(),
    });
    Harness {
        controller,
        factory,
        watcher,
        clips,
    }
}

fn endpoint() -> Endpoint {
    Endpoint::parse("ws://127.0.0.1:9317").unwrap()
}

async fn wait_for_status(
    rx: &mut watch::Receiver<ForwardingStatus>,
    condition: impl FnMut(&ForwardingStatus) -> bool,
) -> ForwardingStatus {
    timeout(Duration::from_secs(2), rx.wait_for(condition))
        .await
        .expect("timed out waiting for status")
        .expect("status channel closed")
        .clone()
}

#[tokio::test]
async fn test_start_connects_and_forwards_clips() {
    let h = harness();
    let mut status = h.controller.subscribe_status();

    h.controller
        .start_forwarding(endpoint(), PlatformTier::Unrestricted)
        .await
        .unwrap();
    assert!(h.controller.is_active());

    let connection = h.factory.latest();
    assert_eq!(connection.connects.load(Ordering::SeqCst), 1);

    connection.open();
    wait_for_status(&mut status, |s| s.connected).await;

    h.clips.send("B".to_string()).unwrap();
    wait_for_status(&mut status, |s| s.forwarded == 1).await;

    assert_eq!(connection.sent_texts(), vec!["B".to_string()]);
}

#[tokio::test]
async fn test_clip_while_not_open_is_dropped_not_queued() {
    let h = harness();
    let mut status = h.controller.subscribe_status();
    h.controller
        .start_forwarding(endpoint(), PlatformTier::Unrestricted)
        .await
        .unwrap();
    let connection = h.factory.latest();

    h.clips.send("early".to_string()).unwrap();
    wait_for_status(&mut status, |s| s.dropped == 1).await;

    connection.open();
    wait_for_status(&mut status, |s| s.connected).await;
    h.clips.send("late".to_string()).unwrap();
    let current = wait_for_status(&mut status, |s| s.forwarded == 1).await;

    assert_eq!(current.dropped, 1);
    assert_eq!(connection.sent_texts(), vec!["late".to_string()]);
}

#[tokio::test]
async fn test_start_while_active_is_rejected_and_session_untouched() {
    let h = harness();
    h.controller
        .start_forwarding(endpoint(), PlatformTier::Unrestricted)
        .await
        .unwrap();
    let first = h.factory.latest();

    let result = h
        .controller
        .start_forwarding(endpoint(), PlatformTier::FocusGated)
        .await;

    assert_eq!(result, Err(ForwardingError::AlreadyActive));
    assert_eq!(h.factory.count(), 1);
    assert_eq!(first.closes.load(Ordering::SeqCst), 0);
    assert!(h.controller.is_active());

    h.controller.stop_forwarding().await;
    assert_eq!(h.watcher.watch_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_stop_twice_is_a_no_op_the_second_time() {
    let h = harness();
    h.controller
        .start_forwarding(endpoint(), PlatformTier::Unrestricted)
        .await
        .unwrap();
    let connection = h.factory.latest();

    assert_eq!(h.controller.stop_forwarding().await, StopOutcome::Stopped);
    assert_eq!(h.controller.stop_forwarding().await, StopOutcome::NotActive);

    assert_eq!(connection.closes.load(Ordering::SeqCst), 1);
    assert!(!h.controller.is_active());
    assert!(!h.watcher.running.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_stop_without_session_reports_not_active() {
    let h = harness();

    assert_eq!(h.controller.stop_forwarding().await, StopOutcome::NotActive);
    assert_eq!(h.factory.count(), 0);
}

#[tokio::test]
async fn test_stop_waits_for_watcher_and_clears_status() {
    let h = harness();
    h.controller
        .start_forwarding(endpoint(), PlatformTier::Unrestricted)
        .await
        .unwrap();
    let connection = h.factory.latest();
    let mut status = h.controller.subscribe_status();
    connection.open();
    wait_for_status(&mut status, |s| s.connected).await;

    h.controller.stop_forwarding().await;

    let current = h.controller.status();
    assert!(!current.active);
    assert!(!current.connected);
    assert!(!h.watcher.running.load(Ordering::SeqCst));
    assert_eq!(connection.state(), ConnectionState::Disconnected);
}

#[tokio::test]
async fn test_status_reports_failure_then_recovery() {
    let h = harness();
    let mut status = h.controller.subscribe_status();
    h.controller
        .start_forwarding(endpoint(), PlatformTier::Unrestricted)
        .await
        .unwrap();
    let connection = h.factory.latest();

    connection.fail("connection refused");
    let failed = wait_for_status(&mut status, |s| s.last_error.is_some()).await;
    assert!(!failed.connected);
    assert_eq!(failed.last_error.as_deref(), Some("connection refused"));

    connection.open();
    let recovered = wait_for_status(&mut status, |s| s.connected).await;
    assert_eq!(recovered.last_error, None);
}

#[tokio::test]
async fn test_restart_after_stop_uses_a_fresh_connection() {
    let h = harness();
    h.controller
        .start_forwarding(endpoint(), PlatformTier::Unrestricted)
        .await
        .unwrap();
    h.controller.stop_forwarding().await;

    h.controller
        .start_forwarding(endpoint(), PlatformTier::Unrestricted)
        .await
        .unwrap();

    assert_eq!(h.factory.count(), 2);
    assert!(h.controller.is_active());
    assert_eq!(h.controller.status().forwarded, 0);

    h.controller.stop_forwarding().await;
    assert_eq!(h.watcher.watch_calls.load(Ordering::SeqCst), 2);
}
