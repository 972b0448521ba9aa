use anyhow::Result;
use tracing_subscriber::EnvFilter;

use inventory_select::app::{load_filter_data, App};
use inventory_select::config::AppConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Using default config: {}", err);
            AppConfig::default()
        }
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let data = runtime.block_on(load_filter_data(&config));
    tracing::info!(
        institutions = data.institutions.len(),
        regionals = data.regionals.len(),
        "Starting inventory filters"
    );

    App::run(config, data)
}
