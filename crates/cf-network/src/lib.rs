//! # cf-network
//!
//! Outbound WebSocket connection for clipforward.
//!
//! [`WsConnectionClient`] implements `ConnectionPort` on top of
//! tokio-tungstenite: one session task per dial, lifecycle events delivered in
//! order over an unbounded channel, and a single fixed-backoff retry timer.

pub mod error;
pub mod factory;
pub mod options;
pub mod tls;
pub mod ws;

pub use error::ConnectionError;
pub use factory::WsConnectionFactory;
pub use options::ConnectionOptions;
pub use ws::WsConnectionClient;
