//! # Configuration Loader
//!
//! Two steps, kept apart:
//!
//! 1. [`load_config`] reads the TOML file into the `AppConfig` DTO. Pure data
//!    loading: no defaults, no validation.
//! 2. [`ResolvedConfig::resolve`] fills in defaults, parses the endpoint and
//!    probes the platform tier. This is the only place where config values are
//!    judged.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use cf_core::clipboard::PlatformTier;
use cf_core::config::AppConfig;
use cf_core::{ClientIdentity, Endpoint};
use cf_platform::resolve_platform_tier;

pub const CONFIG_ENV_VAR: &str = "CLIPFORWARD_CONFIG";
pub const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:9317";
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 3000;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
pub const LOG_FILE_NAME: &str = "clipforward.log";

const APP_DIR_NAME: &str = "clipforward";

/// Load configuration from a TOML file.
///
/// **NO validation is performed.** Missing sections and keys become empty
/// values.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Pick the config file: CLI argument, then `CLIPFORWARD_CONFIG`, then
/// `<config_dir>/clipforward/config.toml`.
pub fn config_path(cli_arg: Option<String>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli_arg.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
        .context("Could not determine the user config directory")
}

/// Default log directory: `<data_local_dir>/clipforward/logs`.
pub fn default_log_dir() -> anyhow::Result<PathBuf> {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join("logs"))
        .context("Could not determine the local data directory")
}

/// Configuration with every default applied.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub identity: ClientIdentity,
    pub endpoint: Endpoint,
    pub retry_on_failure: bool,
    pub retry_backoff: Duration,
    pub connect_timeout: Duration,
    pub platform_tier: PlatformTier,
    pub focus_acquire_cmd: String,
    pub focus_release_cmd: String,
    /// `None` leaves the build default in place.
    pub log_level: Option<String>,
    pub log_dir: PathBuf,
}

impl ResolvedConfig {
    pub fn resolve(config: AppConfig) -> anyhow::Result<Self> {
        let device_name = if config.device_name.trim().is_empty() {
            host_name()
        } else {
            config.device_name.trim().to_string()
        };

        let raw_endpoint = if config.endpoint.trim().is_empty() {
            DEFAULT_ENDPOINT
        } else {
            config.endpoint.trim()
        };
        let endpoint = Endpoint::parse(raw_endpoint)
            .with_context(|| format!("Invalid [connection] endpoint: {raw_endpoint}"))?;

        let platform_tier = resolve_platform_tier(&config.platform_tier)
            .context("Invalid [clipboard] platform_tier")?;

        let log_dir = if config.log_path.as_os_str().is_empty() {
            default_log_dir()?
        } else {
            config.log_path
        };

        Ok(Self {
            identity: ClientIdentity::new(device_name, env!("CARGO_PKG_VERSION")),
            endpoint,
            retry_on_failure: config.retry_on_failure.unwrap_or(true),
            retry_backoff: Duration::from_millis(non_zero_or(
                config.retry_backoff_ms,
                DEFAULT_RETRY_BACKOFF_MS,
            )),
            connect_timeout: Duration::from_millis(non_zero_or(
                config.connect_timeout_ms,
                DEFAULT_CONNECT_TIMEOUT_MS,
            )),
            platform_tier,
            focus_acquire_cmd: config.focus_acquire_cmd.trim().to_string(),
            focus_release_cmd: config.focus_release_cmd.trim().to_string(),
            log_level: Some(config.log_level.trim().to_string()).filter(|l| !l.is_empty()),
            log_dir,
        })
    }

    /// Tier B needs something to obtain the focus grant.
    pub fn has_focus_commands(&self) -> bool {
        !self.focus_acquire_cmd.is_empty() || !self.focus_release_cmd.is_empty()
    }
}

fn non_zero_or(value: u64, default: u64) -> u64 {
    if value == 0 {
        default
    } else {
        value
    }
}

fn host_name() -> String {
    gethostname::gethostname()
        .to_str()
        .filter(|name| !name.is_empty())
        .unwrap_or("Unknown Device")
        .to_string()
}
