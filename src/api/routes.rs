//! HTTP API route definitions.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use super::docs::openapi_json;
use super::handlers::{
    car_without_id, create_car, get_car, health, list_cars, render_metrics, update_car,
    AppState,
};
use crate::metrics;

/// Create the API router.
///
/// Methods other than the ones listed per path answer 405.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Car collection
        .route("/cars", get(list_cars).post(create_car))
        // The id is the whole rest of the path, slashes included
        .route("/cars/", get(car_without_id).put(car_without_id))
        .route("/cars/*id", get(get_car).put(update_car))
        // Docs
        .route("/swagger.json", get(openapi_json))
        // Operations
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        .route_layer(middleware::from_fn(track_latency))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Record request latency per matched route.
///
/// Installed with `route_layer`, so only requests that matched a route get here.
async fn track_latency(matched: MatchedPath, request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();

    let response = next.run(request).await;
    metrics::record_http_latency(start, &method, matched.as_str(), response.status().as_u16());
    response
}
