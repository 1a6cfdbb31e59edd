mod identity;

pub use identity::{ClientIdentity, CLIENT_PROTOCOL_VERSION};
