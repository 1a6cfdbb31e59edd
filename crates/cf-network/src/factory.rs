use std::sync::Arc;

use cf_core::network::ConnectionEventReceiver;
use cf_core::ports::{ConnectionFactoryPort, ConnectionPort};

use crate::options::ConnectionOptions;
use crate::ws::WsConnectionClient;

/// Hands out a fresh [`WsConnectionClient`] per forwarding session.
pub struct WsConnectionFactory {
    options: ConnectionOptions,
}

impl WsConnectionFactory {
    pub fn new(options: ConnectionOptions) -> Self {
        Self { options }
    }
}

impl ConnectionFactoryPort for WsConnectionFactory {
    fn create(&self) -> (Arc<dyn ConnectionPort>, ConnectionEventReceiver) {
        let (client, events) = WsConnectionClient::new(self.options.clone());
        (Arc::new(client), events)
    }
}
