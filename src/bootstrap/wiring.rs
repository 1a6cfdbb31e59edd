//! Dependency wiring: concrete adapters in, `ForwardingController` out.

use std::sync::Arc;

use anyhow::Context;
use cf_app::{ForwardingController, ForwardingDeps};
use cf_core::clipboard::PlatformTier;
use cf_core::ports::ReadGrantPort;
use cf_network::{ConnectionOptions, WsConnectionFactory};
use cf_platform::adapters::{CommandReadGrant, NoopReadGrant, SystemClock};
use cf_platform::clipboard::LocalClipboard;
use cf_platform::ClipboardWatcher;
use tracing::{info, warn};

use super::config::ResolvedConfig;

pub fn build_controller(config: &ResolvedConfig) -> anyhow::Result<ForwardingController> {
    let clipboard =
        Arc::new(LocalClipboard::new().context("Failed to open the system clipboard")?);
    let watcher = Arc::new(ClipboardWatcher::new(
        clipboard,
        build_read_grant(config),
        Arc::new(SystemClock),
    ));

    let options = ConnectionOptions::new(config.identity.clone())
        .with_retry(config.retry_on_failure, config.retry_backoff)
        .with_connect_timeout(config.connect_timeout);
    let connections = Arc::new(WsConnectionFactory::new(options));

    Ok(ForwardingController::from_deps(ForwardingDeps {
        watcher,
        connections,
    }))
}

fn build_read_grant(config: &ResolvedConfig) -> Arc<dyn ReadGrantPort> {
    if config.has_focus_commands() {
        info!(
            acquire = %config.focus_acquire_cmd,
            release = %config.focus_release_cmd,
            "Using external focus grant commands"
        );
        return Arc::new(CommandReadGrant::new(
            config.focus_acquire_cmd.clone(),
            config.focus_release_cmd.clone(),
        ));
    }

    if config.platform_tier == PlatformTier::FocusGated {
        warn!("Focus-gated platform without focus commands configured, reads may be denied");
    }
    Arc::new(NoopReadGrant)
}
