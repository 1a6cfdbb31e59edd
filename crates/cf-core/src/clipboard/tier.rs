use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Clipboard access capability of the running platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformTier {
    /// Tier A: background processes may read the clipboard at any time.
    Unrestricted,
    /// Tier B: a read only succeeds while the process holds a focus grant.
    FocusGated,
}

impl PlatformTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformTier::Unrestricted => "unrestricted",
            PlatformTier::FocusGated => "focus_gated",
        }
    }
}

impl fmt::Display for PlatformTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown platform tier: {0}")]
pub struct PlatformTierParseError(pub String);

impl FromStr for PlatformTier {
    type Err = PlatformTierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unrestricted" | "a" | "tier_a" => Ok(PlatformTier::Unrestricted),
            "focus_gated" | "b" | "tier_b" => Ok(PlatformTier::FocusGated),
            other => Err(PlatformTierParseError(other.to_string())),
        }
    }
}
