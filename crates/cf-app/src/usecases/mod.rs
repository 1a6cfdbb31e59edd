pub mod forwarding;

pub use forwarding::{ForwardingController, ForwardingError, StopOutcome};
