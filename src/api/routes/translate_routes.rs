//! Translation relay routes (e.g., /api/translate)

use axum::{routing::post, Router};

use crate::api::controller::translate::TranslateController;
use crate::app_state::AppState;

pub fn translate_routes() -> Router<AppState> {
    Router::new().route(
        "/translate",
        post(TranslateController::translate).fallback(TranslateController::method_not_allowed),
    )
}
