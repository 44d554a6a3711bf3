use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        .layer(
            // Outermost first: the request id must exist before the trace span is made
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Routes under /api/v1, each also reachable with a trailing slash
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/recommendations/bulk", post(handlers::recommend_bulk))
        .route("/recommendations/bulk/", post(handlers::recommend_bulk))
        .route("/recommendations/:product_id", get(handlers::recommend))
        .route("/recommendations/:product_id/", get(handlers::recommend))
}
