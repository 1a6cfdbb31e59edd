//! # cf-core
//!
//! Core domain models and ports for clipforward.
//!
//! This crate contains pure domain logic without any infrastructure dependencies.
//! Platform, network and application crates implement or consume the traits in
//! [`ports`].

pub mod clipboard;
pub mod config;
pub mod device;
pub mod network;
pub mod ports;

// Re-export commonly used types at the crate root
pub use clipboard::{
    ChangeStamp, ChangeTimestampTracker, ClipChangeEvent, PlatformTier, StampObservation,
};
pub use config::AppConfig;
pub use device::ClientIdentity;
pub use network::{
    ConnectionEvent, ConnectionState, Endpoint, EndpointError, InboundMessage, OutboundEnvelope,
};
