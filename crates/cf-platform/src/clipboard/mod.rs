mod local;
mod stamp;

pub use local::LocalClipboard;
pub use stamp::ContentStamp;
