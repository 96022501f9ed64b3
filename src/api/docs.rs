//! OpenAPI document for the car routes, plus the Swagger UI file server.

use std::path::Path;

use axum::{response::IntoResponse, Json, Router};
use tower_http::services::ServeDir;
use utoipa::OpenApi;

use super::handlers::{self, ErrorResponse};
use crate::carstore::Car;

/// Generated API description served at `/swagger.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_cars,
        handlers::create_car,
        handlers::get_car,
        handlers::update_car
    ),
    components(schemas(Car, ErrorResponse)),
    tags((name = "cars", description = "Vehicle records"))
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Router serving the Swagger UI assets found in `dir`.
///
/// Missing files answer 404.
pub fn swagger_ui_router(dir: impl AsRef<Path>) -> Router {
    Router::new().nest_service("/swagger-ui", ServeDir::new(dir.as_ref()))
}
