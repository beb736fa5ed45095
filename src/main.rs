mod app;
mod backend;
mod config;
mod format;
mod health;
mod model;
mod platform;
mod projection;
mod tree;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use backend::http::HttpBackend;
use config::AppConfig;
use platform::native::NativePlatform;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = AppConfig::from_env();
    tracing::info!(
        api = %cfg.api_base_url,
        directory_api = %cfg.directory_api_url,
        "starting crypto analyzer"
    );

    let backend = HttpBackend::from_config(&cfg).context("Failed to set up analyzer client")?;
    let state = app::AppState::new(cfg, Arc::new(backend), Arc::new(NativePlatform::new()));

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Crypto Analyzer",
        native_options,
        Box::new(|_cc| Box::new(state)),
    )
    .map_err(|e| anyhow::anyhow!("UI failed: {e}"))
}
