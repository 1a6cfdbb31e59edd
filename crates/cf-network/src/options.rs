use std::time::Duration;

use cf_core::ClientIdentity;

/// Connection behaviour for one client.
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    /// Sent as the `hello` envelope on every successful open.
    pub identity: ClientIdentity,
    /// Schedule one reconnect after an abnormal termination.
    pub retry_on_failure: bool,
    /// Fixed delay before the reconnect.
    pub retry_backoff: Duration,
    /// Upper bound for the TCP/TLS/WebSocket handshake.
    pub connect_timeout: Duration,
    /// How long `close()` waits for the peer to acknowledge the close frame.
    pub close_grace: Duration,
}

impl ConnectionOptions {
    pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(3000);
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(10_000);
    pub const DEFAULT_CLOSE_GRACE: Duration = Duration::from_secs(3);

    pub fn new(identity: ClientIdentity) -> Self {
        Self {
            identity,
            retry_on_failure: true,
            retry_backoff: Self::DEFAULT_RETRY_BACKOFF,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            close_grace: Self::DEFAULT_CLOSE_GRACE,
        }
    }

    pub fn with_retry(mut self, enabled: bool, backoff: Duration) -> Self {
        self.retry_on_failure = enabled;
        self.retry_backoff = backoff;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_close_grace(mut self, grace: Duration) -> Self {
        self.close_grace = grace;
        self
    }
}
