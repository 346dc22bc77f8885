//! Axum router configuration with middleware.
//!
//! Routes sit at the root to match the browser client's paths.
//! Middleware: CORS, tracing.
//!
//! When `web_dir` is configured and exists, the built web client is served
//! from it. API routes take priority; unknown paths fall through to the SPA's
//! `index.html` for client-side routing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let web_dir = state.config.web_dir.clone();

    let mut router = Router::new()
        .route("/validate-keys", post(handlers::keys::validate_keys))
        .route(
            "/agent",
            post(handlers::agent::post_agent).get(handlers::agent::agent_status),
        )
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if let Some(web_dir) = web_dir.filter(|d| std::path::Path::new(d).exists()) {
        let index_path = format!("{web_dir}/index.html");
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "SPA static file serving enabled");
    }

    router
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
