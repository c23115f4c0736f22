//! Vencimento Engine HTTP server.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vencimento_engine::api::{create_router, AppState};
use vencimento_engine::config::ConfigLoader;
use vencimento_engine::provider::FichasApiClient;
use vencimento_engine::service::VencimentoService;

const CONFIG_ENV: &str = "VENCIMENTO_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config/vencimento.yaml";

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let config_path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let loader = ConfigLoader::load(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path))?;

    let client = FichasApiClient::new(loader.fichas_api())?;
    info!(base_url = %client.base_url(), "Payroll API client ready");

    let export_dir = loader.export().directory.clone();
    let state = AppState::new(VencimentoService::new(client), export_dir);
    let router = create_router(state);

    let bind_address = &loader.server().bind_address;
    let listener = TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("binding {}", bind_address))?;
    info!(address = %bind_address, "Vencimento Engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
