mod app;
mod color;
mod config;
mod data;
mod error;
mod server;
mod state;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;

use config::{Cli, Config};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = Config::from_env()?;

    // No dataset, no page: a load failure ends the process here.
    let dataset = data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading dataset from {}", config.data_path.display()))?;
    log::info!(
        "Loaded {} players from {} countries",
        dataset.len(),
        dataset.countries().len()
    );
    if dataset.is_empty() {
        log::warn!("{} contains no players", config.data_path.display());
    } else if dataset.len() > ui::table::MAX_ROWS {
        log::warn!(
            "dataset has {} rows; the table shows the first {}",
            dataset.len(),
            ui::table::MAX_ROWS
        );
    }

    let app = server::router(AppState::new(dataset));
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    log::info!("dashboard listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await.context("serving dashboard")?;

    Ok(())
}
