mod strategy;
mod watcher;

pub use strategy::{
    detect_change, ClipboardReadStrategy, ContinuousPollStrategy, FocusGatedPollStrategy,
    PollTimings,
};
pub use watcher::ClipboardWatcher;
