//! Service entrypoint: configuration, tracing, and the HTTP listener.

use std::sync::Arc;

use anyhow::Context;
use icepanel_client::IcepanelClient;
use provisioner_config::ConfigLoader;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use provisioner_server::{AppState, BASE_PATH, app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    let config = ConfigLoader::new()
        .load_dotenv()?
        .from_env()?
        .build()
        .context("failed to load configuration")?;

    let icepanel = IcepanelClient::from_config(&config)
        .context("failed to build the IcePanel client")?;

    let state = Arc::new(AppState { icepanel });
    let router = app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, base_path = BASE_PATH, "specific provisioner listening");
    axum::serve(listener, router).await?;
    Ok(())
}
