//! Chronle terminal client.
//!
//! Composition root: loads configuration from the environment, sets up
//! logging, wires the runtime (feeds, driver, session), and runs the
//! interactive guess loop.

mod app;
mod config;

use anyhow::Result;

use crate::app::App;
use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    tracing::debug!(?config, "starting chronle client");

    App::build(config).await?.run().await
}
