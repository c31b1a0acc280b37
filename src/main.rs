use std::path::PathBuf;

use anyhow::{Context, Result};
use benefit_engine::api::{AppState, create_router};
use benefit_engine::config::ConfigLoader;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing engine.yaml and state_taxes.yaml (defaults to the built-in tables)
    #[arg(short, long, env = "BENEFIT_ENGINE_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "BENEFIT_ENGINE_BIND", default_value = "0.0.0.0:3000")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(dir) => ConfigLoader::load(dir)
            .with_context(|| format!("loading configuration from {}", dir.display()))?,
        None => ConfigLoader::embedded().context("loading built-in configuration")?,
    };

    info!(
        tax_year = config.state_taxes().tax_year(),
        states = config.state_taxes().states().len(),
        default_cap_pct = %config.settings().default_safety_cap_pct,
        billing_cap_pct = %config.settings().billing_safety_cap_pct,
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));
    let listener = TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;

    info!(addr = %args.bind, "Benefit engine listening");
    axum::serve(listener, app).await?;
    Ok(())
}
