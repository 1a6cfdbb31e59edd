//! WebSocket implementation of `ConnectionPort`.
//!
//! ```text
//! connect() ──spawn──> session task: dial ─> Open ─> hello ─> select! { inbound frames, outbound commands }
//!                              │
//!                              └─ failure ─> Disconnected ─> retry timer (at most one) ─> new session
//! ```
//!
//! State lives behind a std `Mutex` that is only held for synchronous updates,
//! never across an await. Each session carries a generation number so a stale
//! session cannot overwrite the state of a newer one.

mod client;
mod session;

pub use client::WsConnectionClient;
