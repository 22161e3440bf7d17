use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the application shell router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/state", get(handlers::get_state))
        // Filters
        .route("/filters/time", put(handlers::set_time))
        .route("/filters/genres/toggle", post(handlers::toggle_genre))
        .route(
            "/filters/exclude-adult/toggle",
            post(handlers::toggle_exclude_adult),
        )
        // Recommendations
        .route("/recommendations", post(handlers::load_recommendations))
        .route("/recommendations/replace", post(handlers::replace_item))
        // Detail view
        .route("/detail", put(handlers::set_detail).get(handlers::get_detail))
        .route("/movies/:id/watched", post(handlers::mark_watched))
        .route("/movies/:id/play", post(handlers::play))
        // Session
        .route("/session/reset", post(handlers::reset))
        .route("/session/logout", post(handlers::logout))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
