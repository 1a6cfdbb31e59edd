use std::sync::Arc;

use anyhow::Context;
use cf_core::config::AppConfig;
use clipforward::bootstrap::{
    build_controller, config_path, load_config, run_app, tracing::init_tracing_subscriber,
    ResolvedConfig,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = config_path(std::env::args().nth(1))?;
    let (app_config, from_file) = if path.exists() {
        (load_config(&path)?, true)
    } else {
        (AppConfig::empty(), false)
    };
    let config = ResolvedConfig::resolve(app_config)?;

    init_tracing_subscriber(config.log_level.as_deref(), &config.log_dir)
        .context("Failed to initialize tracing")?;

    if from_file {
        info!(path = %path.display(), "Loaded configuration");
    } else {
        info!(path = %path.display(), "No config file, using defaults");
    }
    info!(
        device = %config.identity.device_name,
        endpoint = %config.endpoint,
        tier = %config.platform_tier,
        "Starting clipforward"
    );

    let controller = Arc::new(build_controller(&config)?);
    run_app(config, controller).await
}
