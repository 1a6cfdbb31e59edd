mod event;
mod tier;
mod timestamp;

pub use event::ClipChangeEvent;
pub use tier::{PlatformTier, PlatformTierParseError};
pub use timestamp::{ChangeStamp, ChangeTimestampTracker, StampObservation};
