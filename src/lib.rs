//! clipforward: forward clipboard text to a remote listener over a persistent
//! WebSocket connection.

pub mod bootstrap;
