//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

use crate::carstore::{Car, CarStore};
use crate::error::{ApiError, StoreError};
use crate::metrics;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Backing car store.
    pub store: Arc<dyn CarStore>,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state over `store`.
    pub fn new(store: impl CarStore + 'static) -> Self {
        Self::from_arc(Arc::new(store))
    }

    /// Create new app state over an already shared store.
    pub fn from_arc(store: Arc<dyn CarStore>) -> Self {
        Self {
            store,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable reason.
    pub error: String,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::CarNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::Creation) => StatusCode::BAD_REQUEST,
            ApiError::Store(StoreError::Update { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            // Missing cars answer with a zero-valued car, as clients expect a
            // car-shaped body from these routes.
            ApiError::CarNotFound { .. } => (status, Json(Car::default())).into_response(),
            other => (
                status,
                Json(ErrorResponse {
                    error: other.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// Decode a car from a raw request body.
///
/// The request's content type is not consulted and keys match without regard
/// to case.
fn decode_car(body: &[u8]) -> Result<Car, ApiError> {
    Car::from_json(body).map_err(|e| {
        warn!("Rejecting malformed car body: {}", e);
        ApiError::MalformedBody(e)
    })
}

fn store_failed(err: StoreError) -> ApiError {
    warn!("Store rejected request: {}", err);
    metrics::inc_store_errors(err.kind());
    ApiError::Store(err)
}

/// List every stored car.
#[utoipa::path(
    get,
    path = "/cars",
    tag = "cars",
    responses(
        (status = 200, description = "All stored cars", body = Vec<Car>)
    )
)]
#[instrument(skip(state))]
pub async fn list_cars(State(state): State<AppState>) -> Json<Vec<Car>> {
    let cars = state.store.get_all();
    debug!(count = cars.len(), "Listing cars");
    Json(cars)
}

/// Create a car, replacing any car with the same id.
#[utoipa::path(
    post,
    path = "/cars",
    tag = "cars",
    request_body = Car,
    responses(
        (status = 201, description = "Car stored", body = Car),
        (status = 400, description = "Malformed body or missing Id", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn create_car(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Car>), ApiError> {
    let car = decode_car(&body)?;
    let created = state.store.create(car).map_err(store_failed)?;

    metrics::inc_cars_created();
    info!(id = %created.id, "Car created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Fetch a single car.
#[utoipa::path(
    get,
    path = "/cars/{id}",
    tag = "cars",
    params(("id" = String, Path, description = "Car identifier")),
    responses(
        (status = 200, description = "The car", body = Car),
        (status = 404, description = "No such car; body is an empty car", body = Car)
    )
)]
#[instrument(skip(state))]
pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Car>, ApiError> {
    state
        .store
        .get(&id)
        .map(Json)
        .ok_or(ApiError::CarNotFound { id })
}

/// Answer `/cars/` itself, a lookup of the empty identifier.
///
/// No car can be stored without an id, so this is always the not-found
/// placeholder.
#[instrument]
pub async fn car_without_id() -> ApiError {
    debug!("Request for empty car id");
    ApiError::CarNotFound { id: String::new() }
}

/// Patch a car with the non-empty fields of the body.
///
/// Existence is checked before the body is decoded, so a missing car answers
/// 404 even when the body is malformed.
#[utoipa::path(
    put,
    path = "/cars/{id}",
    tag = "cars",
    params(("id" = String, Path, description = "Car identifier")),
    request_body = Car,
    responses(
        (status = 200, description = "The merged car", body = Car),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 404, description = "No such car; body is an empty car", body = Car),
        (status = 500, description = "Store rejected the update", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Car>, ApiError> {
    if state.store.get(&id).is_none() {
        debug!("Update target missing");
        return Err(ApiError::CarNotFound { id });
    }

    let patch = decode_car(&body)?;
    let updated = state.store.update(&id, patch).map_err(store_failed)?;

    metrics::inc_cars_updated();
    info!(id = %updated.id, "Car updated");
    Ok(Json(updated))
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus exposition handler.
pub async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "metrics recorder not installed".to_string(),
            }),
        )
            .into_response(),
    }
}
