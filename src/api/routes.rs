use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalog
        .route("/titles", get(handlers::get_titles))
        .route("/titles/:id", get(handlers::get_title))
        .route("/stats", get(handlers::get_stats))
        // Recommendations
        .route("/recommendations", get(handlers::recommend))
        .route(
            "/titles/:id/recommendations",
            get(handlers::recommend_by_id),
        )
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}
