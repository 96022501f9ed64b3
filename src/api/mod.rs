//! HTTP API module for the car routes, docs, health, and metrics endpoints.

pub mod docs;
pub mod handlers;
pub mod routes;
pub mod server;

pub use docs::{swagger_ui_router, ApiDoc};
pub use handlers::AppState;
pub use routes::create_router;
pub use server::{bind, serve};
