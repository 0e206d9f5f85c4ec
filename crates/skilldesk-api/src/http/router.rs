//! Axum router configuration with middleware.
//!
//! Middleware: CORS, request tracing.

use axum::Router;
use axum::routing::{get, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers::skill_editor;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/skill_editor/{skill_id}", get(skill_editor::skill_editor_page))
        .route(
            "/skill_editor_handler/rights/{skill_id}",
            get(skill_editor::get_skill_rights),
        )
        .route(
            "/skill_editor_handler/data/{skill_id}",
            get(skill_editor::get_editable_skill)
                .put(skill_editor::update_editable_skill)
                .delete(skill_editor::delete_editable_skill),
        )
        .route(
            "/skill_editor_handler/publish_skill/{skill_id}",
            put(skill_editor::publish_skill),
        )
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
