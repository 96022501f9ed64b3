//! Car records and their storage.
//!
//! This module handles:
//! - The `Car` record and its patch rule
//! - The `CarStore` trait the HTTP layer depends on
//! - An in-memory implementation
//! - A mock store for testing

pub mod car;
pub mod fixtures;
pub mod memory;
pub mod mock;
pub mod store;

pub use car::Car;
pub use memory::InMemoryCarStore;
pub use mock::{MockCarStore, MockConfig, StoreCall};
pub use store::CarStore;
