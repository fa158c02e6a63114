//! API Router configuration

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the main API router
pub fn create_router(state: AppState, enable_cors: bool) -> Router {
    let api_routes = Router::new()
        // Health and status
        .route("/health", get(handlers::health_check))
        .route("/status", get(handlers::daemon_status))
        // Detection ingest
        .route("/detections", post(handlers::record_detection))
        // Registry projections
        .route("/devices", get(handlers::list_devices))
        .route("/readers", get(handlers::list_readers))
        // Presence views
        .route("/readers/:id", get(handlers::get_reader_view))
        .route("/readers/:id/live", get(handlers::stream_reader_view));

    // Build router with middleware
    let mut app = Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    app.with_state(state)
}
