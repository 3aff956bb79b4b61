use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use sheets_live_api::{
    adapters::config::app_config::DEFAULT_CONFIG_PATH, router, telemetry, AppConfig, AppState,
    SheetsClient,
};
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

#[derive(Parser, Debug)]
#[command(version, about = "Serve a Google spreadsheet as JSON and append rows to it")]
struct Args {
    /// Address to listen on. Overrides BIND_ADDRESS.
    #[arg(long)]
    bind: Option<String>,

    /// Config file read before the environment. A missing file is ignored.
    #[arg(long, env = "CONFIG_PATH", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)
        .with_context(|| format!("Error reading config '{}'", args.config))?;
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }

    telemetry::setup_tracing(&config.log_level, config.log_json)?;
    setup_panic_hook();

    serve(config).await
}

#[instrument(skip_all, fields(bind_address = %config.bind_address))]
async fn serve(config: AppConfig) -> anyhow::Result<()> {
    for missing in config.missing_values() {
        warn!("{} is not set, /sheet requests will fail until it is", missing);
    }

    let sheets = Arc::new(SheetsClient::new(config.spreadsheet()));
    let bind_address = config.bind_address.clone();
    let app = router(AppState::new(config, sheets));

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutting down");
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
