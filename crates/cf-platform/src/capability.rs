//! Platform capability detection for clipboard access.
//!
//! Detects whether background clipboard reads are unrestricted (Tier A) or
//! need a transient focus grant first (Tier B).

use cf_core::clipboard::{PlatformTier, PlatformTierParseError};

/// Detect the clipboard access tier of the current platform.
///
/// # Detection Logic
///
/// - **Android**: `FocusGated` (background reads require input focus)
/// - **Linux**:
///   - Wayland-only session (no XWayland `DISPLAY`) → `FocusGated`
///   - Otherwise → `Unrestricted`
/// - **Other**: `Unrestricted`
pub fn detect_platform_tier() -> PlatformTier {
    #[cfg(target_os = "android")]
    {
        return PlatformTier::FocusGated;
    }

    #[cfg(target_os = "linux")]
    {
        if is_wayland_only() {
            tracing::info!("Wayland-only session detected, clipboard reads need a focus grant");
            return PlatformTier::FocusGated;
        }
        PlatformTier::Unrestricted
    }

    #[cfg(not(any(target_os = "android", target_os = "linux")))]
    {
        PlatformTier::Unrestricted
    }
}

/// Resolve the configured tier, probing the platform for `auto` or empty.
pub fn resolve_platform_tier(configured: &str) -> Result<PlatformTier, PlatformTierParseError> {
    match configured.trim() {
        "" | "auto" => Ok(detect_platform_tier()),
        other => other.parse(),
    }
}

/// A Wayland compositor is running and no X server is reachable.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn is_wayland_only() -> bool {
    std::env::var("WAYLAND_DISPLAY").is_ok() && std::env::var("DISPLAY").is_err()
}
