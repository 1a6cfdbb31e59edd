mod endpoint;
mod envelope;
mod events;
mod state;

pub use endpoint::{Endpoint, EndpointError};
pub use envelope::{ClipPayload, HelloPayload, OutboundEnvelope};
pub use events::{ConnectionEvent, ConnectionEventReceiver, ConnectionEventSender, InboundMessage};
pub use state::ConnectionState;
