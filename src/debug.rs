use anyhow::{Context, Result};
use reqwest::Client;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::app_state::build_app_state;
use crate::client::session::TranslatorSession;
use crate::client::transport::HttpRelayTransport;
use crate::config::AppConfig;
use crate::core::persistence::preferences::preference_fs_adapter::PreferenceFsAdapter;
use crate::routes::app_router;

const SMOKE_TEXT: &str = "Hello, world! How are you today?";

/// Runs only when in QUICK_TRANSLATE_DEBUG_MODE
///
/// Starts the relay on a loopback port and pushes one translation through the
/// client, using the settings saved in the configured preferences file.
pub async fn run_debug(config: &AppConfig) -> Result<()> {
    info!("🔧 Debug mode: running smoke translation...");

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("Failed to bind debug relay")?;
    let addr = listener.local_addr()?;
    let app = app_router().with_state(build_app_state()?);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            warn!("Debug relay stopped: {}", e);
        }
    });

    let store = PreferenceFsAdapter::new(&config.settings_file);
    let transport = HttpRelayTransport::new(Client::new(), &format!("http://{}", addr));
    let mut session = TranslatorSession::load(store, transport)?;

    if session.needs_configuration() {
        warn!(
            "Please configure your API settings in {} to start translating",
            config.settings_file.display()
        );
        return Ok(());
    }

    session.set_target_language("es")?;
    session.set_source_text(SMOKE_TEXT)?;

    match session.translate().await {
        Ok(text) => info!("Translation: {}", text),
        Err(e) => warn!("Translation error: {}", e),
    }

    info!("Debug tasks completed. Exiting...");
    Ok(())
}
