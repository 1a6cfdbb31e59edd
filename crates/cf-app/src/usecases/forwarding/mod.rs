//! Forwarding session use case
//!
//! ```text
//! ClipboardWatcherPort ──ClipChangeEvent──> ClipForwarder ──clip──> ConnectionPort
//!                                                                        │
//!                       ForwardingStatus <── event pump <──ConnectionEvent┘
//! ```

mod controller;
mod error;
mod event_pump;
mod forwarder;
mod status;

pub use controller::{ForwardingController, ForwardingDeps};
pub use error::{ForwardingError, StopOutcome};
pub use forwarder::ClipForwarder;
pub use status::ForwardingStatus;
