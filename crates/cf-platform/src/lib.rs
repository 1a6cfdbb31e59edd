//! # cf-platform
//!
//! Platform-specific implementations for clipforward.
//!
//! This crate contains the adapters that touch the operating system (clipboard,
//! focus grant commands, system clock) and the clipboard watcher runtime that
//! drives them.

pub mod adapters;
pub mod capability;
pub mod clipboard;
pub mod runtime;

pub use capability::{detect_platform_tier, resolve_platform_tier};
pub use runtime::clipboard::{ClipboardWatcher, PollTimings};
