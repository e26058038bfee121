//! Beacon web server.
//!
//! Serves the advocacy site's pages: a home page composed of the latest
//! news and publications, list and detail pages for each content section,
//! static marketing pages, and the `/img` asset tree.

mod config;
mod handlers;
mod routes;
mod state;
mod views;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set up logging")?;

    let config = Config::parse();

    let state = Arc::new(
        AppState::new(config.content_api_url.as_deref())
            .context("Failed to initialize application state")?,
    );
    let app = routes::router(state, &config.assets_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("Listening on http://{}", config.bind);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
