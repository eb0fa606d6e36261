mod ai;
mod analysis;
mod app;
mod config;
mod domain;
mod http;
mod infrastructure;

use anyhow::Result;
use infrastructure::{directories, logging, shutdown::Shutdown};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let shutdown = Shutdown::new();
    shutdown.listen_for_signals();

    let app = app::PhishGuardApp::initialize(config, paths, shutdown);
    app.run().await
}
