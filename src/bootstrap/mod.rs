pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{config_path, load_config, ResolvedConfig};
pub use run::run_app;
pub use wiring::build_controller;
