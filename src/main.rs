use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use quick_translate::app_state::build_app_state;
use quick_translate::config::AppConfig;
use quick_translate::routes::app_router;
use quick_translate::{debug, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let _log_guard = logging::init_tracing(&config.log_dir)?;

    if config.debug_mode {
        return debug::run_debug(&config).await;
    }

    let app = app_router().with_state(build_app_state()?);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🌐 Translation relay listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
