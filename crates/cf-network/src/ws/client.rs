use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cf_core::network::{
    ConnectionEvent, ConnectionEventReceiver, ConnectionEventSender, ConnectionState, Endpoint,
    OutboundEnvelope,
};
use cf_core::ports::{ConnectionPort, SendError};
use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::session::{run_session, SessionCommand};
use crate::error::ConnectionError;
use crate::options::ConnectionOptions;
use crate::tls::ensure_crypto_provider;

/// Persistent WebSocket client with a single fixed-backoff auto-retry.
///
/// Every method returns immediately. Lifecycle changes are reported through
/// the [`ConnectionEventReceiver`] returned by [`WsConnectionClient::new`].
pub struct WsConnectionClient {
    inner: Arc<ClientInner>,
}

pub(super) struct ClientInner {
    pub(super) options: ConnectionOptions,
    events: ConnectionEventSender,
    shared: Mutex<Shared>,
}

struct Shared {
    state: ConnectionState,
    endpoint: Option<Endpoint>,
    generation: u64,
    outbound: Option<mpsc::UnboundedSender<SessionCommand>>,
    session: Option<JoinHandle<()>>,
    retry: Option<JoinHandle<()>>,
    closed_by_user: bool,
}

impl WsConnectionClient {
    pub fn new(options: ConnectionOptions) -> (Self, ConnectionEventReceiver) {
        ensure_crypto_provider();
        let (events, rx) = mpsc::unbounded_channel();
        let inner = Arc::new(ClientInner {
            options,
            events,
            shared: Mutex::new(Shared {
                state: ConnectionState::Disconnected,
                endpoint: None,
                generation: 0,
                outbound: None,
                session: None,
                retry: None,
                closed_by_user: false,
            }),
        });
        (Self { inner }, rx)
    }
}

impl ConnectionPort for WsConnectionClient {
    fn connect(&self, endpoint: &Endpoint) {
        let mut shared = self.inner.lock();
        if let Some(retry) = shared.retry.take() {
            debug!("Cancelling pending reconnect");
            retry.abort();
        }
        shared.closed_by_user = false;

        if shared.state != ConnectionState::Disconnected {
            debug!(state = %shared.state, "connect() ignored, connection already active");
            return;
        }

        shared.endpoint = Some(endpoint.clone());
        self.inner.start_session(&mut shared);
    }

    fn send(&self, envelope: &OutboundEnvelope) -> Result<(), SendError> {
        let shared = self.inner.lock();
        if !shared.state.is_open() {
            return Err(SendError::NotConnected(shared.state));
        }
        let json = envelope
            .to_json()
            .map_err(|e| SendError::Encode(e.to_string()))?;

        match &shared.outbound {
            Some(tx) => tx
                .send(SessionCommand::Send(json))
                .map_err(|_| SendError::NotConnected(ConnectionState::Disconnected)),
            None => Err(SendError::NotConnected(shared.state)),
        }
    }

    fn close(&self) {
        let mut shared = self.inner.lock();
        shared.closed_by_user = true;
        if let Some(retry) = shared.retry.take() {
            debug!("Cancelling pending reconnect");
            retry.abort();
        }

        match shared.state {
            ConnectionState::Connecting => {
                info!("Closing connection before it opened");
                if let Some(session) = shared.session.take() {
                    session.abort();
                }
                shared.generation += 1;
                shared.outbound = None;
                shared.state = ConnectionState::Disconnected;
                self.inner.emit(ConnectionEvent::Closed {
                    code: 1000,
                    reason: "closed before open".to_string(),
                });
            }
            ConnectionState::Open => {
                info!("Closing connection");
                shared.state = ConnectionState::Closing;
                self.inner.emit(ConnectionEvent::Closing {
                    code: 1000,
                    reason: "closed by client".to_string(),
                });
                let delivered = shared
                    .outbound
                    .as_ref()
                    .map(|tx| tx.send(SessionCommand::Close).is_ok())
                    .unwrap_or(false);
                if !delivered {
                    shared.generation += 1;
                    shared.outbound = None;
                    shared.session = None;
                    shared.state = ConnectionState::Disconnected;
                    self.inner.emit(ConnectionEvent::Closed {
                        code: 1000,
                        reason: "closed by client".to_string(),
                    });
                }
            }
            ConnectionState::Disconnected | ConnectionState::Closing => {}
        }
    }

    fn state(&self) -> ConnectionState {
        self.inner.lock().state
    }
}

impl Drop for WsConnectionClient {
    fn drop(&mut self) {
        self.close();
    }
}

impl ClientInner {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: ConnectionEvent) {
        // Receiver gone means nobody is listening any more.
        let _ = self.events.send(event);
    }

    fn start_session(self: &Arc<Self>, shared: &mut Shared) {
        let Some(endpoint) = shared.endpoint.clone() else {
            return;
        };
        shared.generation += 1;
        shared.state = ConnectionState::Connecting;

        let (tx, rx) = mpsc::unbounded_channel();
        shared.outbound = Some(tx);
        let session = run_session(self.clone(), endpoint, shared.generation, rx);
        shared.session = Some(tokio::spawn(supervise(
            self.clone(),
            shared.generation,
            session,
        )));
    }

    /// Connecting → Open. Returns false when the session is stale.
    pub(super) fn mark_open(&self, generation: u64) -> bool {
        let mut shared = self.lock();
        if shared.generation != generation || shared.state != ConnectionState::Connecting {
            return false;
        }
        shared.state = ConnectionState::Open;
        self.emit(ConnectionEvent::Open);
        true
    }

    pub(super) fn on_message(&self, generation: u64, event: ConnectionEvent) {
        let shared = self.lock();
        if shared.generation == generation {
            self.emit(event);
        }
    }

    /// The peer sent a close frame.
    pub(super) fn mark_closing(&self, generation: u64, code: u16, reason: &str) {
        let mut shared = self.lock();
        if shared.generation != generation || shared.state != ConnectionState::Open {
            return;
        }
        shared.state = ConnectionState::Closing;
        self.emit(ConnectionEvent::Closing {
            code,
            reason: reason.to_string(),
        });
    }

    pub(super) fn mark_closed(&self, generation: u64, code: u16, reason: &str) {
        let mut shared = self.lock();
        if shared.generation != generation {
            return;
        }
        shared.state = ConnectionState::Disconnected;
        shared.outbound = None;
        shared.session = None;
        info!(code, reason, "Connection closed");
        self.emit(ConnectionEvent::Closed {
            code,
            reason: reason.to_string(),
        });
    }

    pub(super) fn fail(self: &Arc<Self>, generation: u64, error: ConnectionError) {
        let mut shared = self.lock();
        if shared.generation != generation {
            return;
        }
        shared.state = ConnectionState::Disconnected;
        shared.outbound = None;
        shared.session = None;

        warn!(error = %error, "Connection failed");
        self.emit(ConnectionEvent::Failure {
            error: error.to_string(),
        });

        if self.options.retry_on_failure && !shared.closed_by_user && shared.retry.is_none() {
            self.schedule_retry(&mut shared);
        }
    }

    fn schedule_retry(self: &Arc<Self>, shared: &mut Shared) {
        let backoff = self.options.retry_backoff;
        info!(backoff_ms = backoff.as_millis() as u64, "Scheduling reconnect");

        let inner = self.clone();
        shared.retry = Some(tokio::spawn(async move {
            tokio::time::sleep(backoff).await;
            let mut shared = inner.lock();
            shared.retry = None;
            if shared.closed_by_user || shared.state != ConnectionState::Disconnected {
                return;
            }
            info!("Reconnecting");
            inner.start_session(&mut shared);
        }));
    }
}

/// Run one session and turn a panic inside it into a connection failure.
async fn supervise<F>(inner: Arc<ClientInner>, generation: u64, session: F)
where
    F: Future<Output = ()> + Send,
{
    if let Err(payload) = AssertUnwindSafe(session).catch_unwind().await {
        let reason = panic_message(payload.as_ref());
        error!(reason, "Connection session panicked");
        inner.fail(
            generation,
            ConnectionError::Transport(format!("session task panicked: {reason}")),
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
