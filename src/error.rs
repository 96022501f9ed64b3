//! Unified error types for the car service.

use thiserror::Error;

/// Process-level error: configuration, binding, recorder setup.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Metrics recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by a [`CarStore`](crate::carstore::CarStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A car was submitted for creation without an identifier.
    #[error("unable to create a car without id")]
    Creation,

    /// No car exists under the identifier being updated.
    #[error("unable to update car {id}: no car with that id")]
    Update {
        /// The identifier that was looked up.
        id: String,
    },
}

impl StoreError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Creation => "creation",
            StoreError::Update { .. } => "update",
        }
    }
}

/// Errors surfaced by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body was not a valid car document.
    #[error("invalid JSON request body: {0}")]
    MalformedBody(#[source] serde_json::Error),

    /// No car exists under the requested identifier.
    #[error("car {id} not found")]
    CarNotFound {
        /// The identifier from the request path.
        id: String,
    },

    /// The store rejected the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
