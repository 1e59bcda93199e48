use anyhow::Result;
use clap::Parser;
use tracing::info;

use dashboard_bootstrap::{cli::Cli, logging};
use dashboard_infrastructure::{AppConfig, CONFIG_ENV};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(config) = &cli.config {
        std::env::set_var(CONFIG_ENV, config);
    }

    let config = AppConfig::load().await?;
    let _log_guard = logging::init(config.log_dir().as_deref())?;
    info!(api = %config.api_base_url, "configuration loaded");

    dashboard_bootstrap::run(cli.command, config).await
}
