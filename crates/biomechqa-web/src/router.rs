//! Axum router. Maps all URL paths to handlers.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::{
    services::ServeDir,
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use std::path::Path;
use std::sync::Arc;
use crate::config::RedirectRule;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    page::index_page,
    qa::{qa_submit, api_topics},
    system::{health, api_config},
};

/// Build and return the full Axum router.
/// Redirect sources must already have passed `Config::validate`.
pub fn build_router(state: AppState, redirects: &[RedirectRule], static_dir: &Path) -> Router {
    let shared: SharedState = Arc::new(state);

    let mut router = Router::new()
        // Pages
        .route("/",           get(index_page))
        .route("/health",     get(health))

        // API endpoints
        .route("/api/qa",     post(qa_submit))
        .route("/api/topics", get(api_topics))
        .route("/api/config", get(api_config))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir));

    for rule in redirects {
        let destination = rule.destination.clone();
        router = if rule.permanent {
            router.route(&rule.source, get(move || async move { Redirect::permanent(&destination) }))
        } else {
            router.route(&rule.source, get(move || async move { Redirect::temporary(&destination) }))
        };
    }

    router
        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
