//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `cf-app` and the
//! adapters in `cf-platform` / `cf-network`. The core never depends on an
//! adapter directly.
//!
//! ## Port Placement Guidelines
//!
//! A trait belongs here when it represents a capability the forwarding use
//! case depends on and the platform or network layer implements.

mod clip_change_handler;
pub mod clipboard;
mod clipboard_watcher;
mod clock;
pub mod connection;
mod read_grant;

pub use clip_change_handler::ClipChangeHandler;
pub use clipboard::{ClipboardReadError, ClipboardSourcePort};
pub use clipboard_watcher::ClipboardWatcherPort;
pub use clock::ClockPort;
pub use connection::{ConnectionFactoryPort, ConnectionPort, SendError};
pub use read_grant::ReadGrantPort;
