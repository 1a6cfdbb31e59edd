//! # Pure Data Module - Data Transfer Objects Only
//!
//! Maps a TOML document onto [`AppConfig`]. Missing keys become empty values;
//! defaults and validation are applied by the bootstrap layer, never here.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Device name announced in `hello` (may be empty)
    pub device_name: String,

    /// Listener URI, unparsed
    pub endpoint: String,

    /// `None` when the key is absent
    pub retry_on_failure: Option<bool>,

    /// Fixed reconnect interval in milliseconds (0 when absent)
    pub retry_backoff_ms: u64,

    /// Dial timeout in milliseconds (0 when absent)
    pub connect_timeout_ms: u64,

    /// `auto`, `unrestricted`, `focus_gated`, or empty
    pub platform_tier: String,

    /// External command run to obtain the focus grant (may be empty)
    pub focus_acquire_cmd: String,

    /// External command run to release the focus grant (may be empty)
    pub focus_release_cmd: String,

    /// Log level directive (may be empty)
    pub log_level: String,

    /// Log directory (empty path when absent)
    pub log_path: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let int_at = |section: &str, key: &str| -> u64 {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64
        };

        Ok(Self {
            device_name: str_at("general", "device_name"),
            endpoint: str_at("connection", "endpoint"),
            retry_on_failure: toml_value
                .get("connection")
                .and_then(|c| c.get("retry_on_failure"))
                .and_then(|v| v.as_bool()),
            retry_backoff_ms: int_at("connection", "retry_backoff_ms"),
            connect_timeout_ms: int_at("connection", "connect_timeout_ms"),
            platform_tier: str_at("clipboard", "platform_tier"),
            focus_acquire_cmd: str_at("clipboard", "focus_acquire_cmd"),
            focus_release_cmd: str_at("clipboard", "focus_release_cmd"),
            log_level: str_at("log", "level"),
            log_path: PathBuf::from(str_at("log", "path")),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            device_name: String::new(),
            endpoint: String::new(),
            retry_on_failure: None,
            retry_backoff_ms: 0,
            connect_timeout_ms: 0,
            platform_tier: String::new(),
            focus_acquire_cmd: String::new(),
            focus_release_cmd: String::new(),
            log_level: String::new(),
            log_path: PathBuf::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_returns_empty_device_name_when_missing() {
        let toml_str = r#"
            [general]
            # device_name is missing
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.device_name, "");
        assert_eq!(config.retry_on_failure, None);
    }

    #[test]
    fn test_from_toml_parses_all_sections() {
        let toml_str = r#"
            [general]
            device_name = "pixel"

            [connection]
            endpoint = "ws://192.168.31.164:9317"
            retry_on_failure = false
            retry_backoff_ms = 2500
            connect_timeout_ms = 8000

            [clipboard]
            platform_tier = "focus_gated"
            focus_acquire_cmd = "focus-grab"
            focus_release_cmd = "focus-drop"

            [log]
            level = "trace"
            path = "/var/log/clipforward"
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.device_name, "pixel");
        assert_eq!(config.endpoint, "ws://192.168.31.164:9317");
        assert_eq!(config.retry_on_failure, Some(false));
        assert_eq!(config.retry_backoff_ms, 2500);
        assert_eq!(config.connect_timeout_ms, 8000);
        assert_eq!(config.platform_tier, "focus_gated");
        assert_eq!(config.focus_acquire_cmd, "focus-grab");
        assert_eq!(config.focus_release_cmd, "focus-drop");
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.log_path, PathBuf::from("/var/log/clipforward"));
    }

    #[test]
    fn test_from_toml_does_not_validate_endpoint() {
        let toml_str = r#"
            [connection]
            endpoint = "not a url"
            retry_backoff_ms = -5
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        // Raw facts only; the bootstrap layer rejects this endpoint later.
        assert_eq!(config.endpoint, "not a url");
        assert_eq!(config.retry_backoff_ms, 0);
    }

    #[test]
    fn test_empty_creates_valid_dto() {
        let config = AppConfig::empty();

        assert_eq!(config.endpoint, "");
        assert_eq!(config.connect_timeout_ms, 0);
        assert_eq!(config.log_path, PathBuf::new());
    }
}
