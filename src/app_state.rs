use std::sync::Arc;

use anyhow::Context;
use reqwest::Client;

use crate::domain::translate::service::relay_service::RelayService;

#[derive(Clone)]
pub struct AppState {
    pub relay_service: Arc<RelayService>,
}

pub fn build_app_state() -> anyhow::Result<AppState> {
    let client = Client::builder()
        .build()
        .context("Failed to build HTTP client")?;

    Ok(AppState {
        relay_service: Arc::new(RelayService::new(client)),
    })
}
