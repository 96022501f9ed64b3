//! CarStore - the storage seam used by the HTTP layer.

use super::Car;
use crate::error::StoreError;

/// Keyed collection of cars.
///
/// Implementations must keep every entry stored under its own `id`.
pub trait CarStore: Send + Sync {
    /// Get a car by ID. Returns None if not found.
    fn get(&self, id: &str) -> Option<Car>;

    /// Every stored car, in no particular order.
    fn get_all(&self) -> Vec<Car>;

    /// Insert `car` under its own ID, replacing any existing entry.
    ///
    /// Fails with [`StoreError::Creation`] when `car.id` is empty.
    fn create(&self, car: Car) -> Result<Car, StoreError>;

    /// Merge `patch` onto the car stored at `id` and return the result.
    ///
    /// The merged car stays under `id` regardless of `patch.id`. Fails with
    /// [`StoreError::Update`] when nothing is stored at `id`.
    fn update(&self, id: &str, patch: Car) -> Result<Car, StoreError>;
}
