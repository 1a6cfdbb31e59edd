mod clock;
mod read_grant;

pub use clock::SystemClock;
pub use read_grant::{CommandReadGrant, NoopReadGrant};
