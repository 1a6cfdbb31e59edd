//! # cf-app
//!
//! Application layer for clipforward: the forwarding session that wires the
//! clipboard watcher into the connection's send path.

pub mod usecases;

pub use usecases::forwarding::{
    ClipForwarder, ForwardingController, ForwardingDeps, ForwardingError, ForwardingStatus,
    StopOutcome,
};
