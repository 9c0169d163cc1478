use axum::{http::StatusCode, middleware, response::IntoResponse, Router};
use tower_http::trace::TraceLayer;

use crate::api::util::cors::{preflight, with_cors_headers};
use crate::app_state::AppState;

/// Build the main application router
pub fn app_router() -> Router<AppState> {
    let router = Router::new()
        // Translation relay lives under /api
        .nest("/api", crate::api::routes::translate_routes::translate_routes())
        // Fallback handler for 404
        .fallback(handler_404)
        .layer(middleware::from_fn(preflight))
        .layer(TraceLayer::new_for_http());

    with_cors_headers(router)
}

// Handler for 404 Not Found
async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
}
