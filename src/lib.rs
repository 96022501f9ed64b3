//! In-memory vehicle records behind a small JSON HTTP API.
//!
//! A [`CarStore`](carstore::CarStore) holds cars keyed by identifier and the
//! [`api`] layer maps HTTP requests onto it:
//!
//! ```text
//! GET  /cars        list every car
//! POST /cars        create (or replace) a car; Id is required
//! GET  /cars/{id}   fetch one car
//! PUT  /cars/{id}   merge the non-empty fields of the body into a car
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`carstore`]: Car record, store trait, in-memory and mock stores
//! - [`api`]: HTTP routes, handlers, docs and server startup
//! - [`metrics`]: Prometheus counters and latency histograms
//! - [`utils`]: Utility functions

pub mod api;
pub mod carstore;
pub mod config;
pub mod error;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
