//! Mock car store for unit testing.
//!
//! Records every call it receives and can be told to fail, so handler tests
//! can check which store operations a request reached.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{Car, CarStore};
use crate::error::StoreError;

/// Configuration for mock store behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Whether to fail create requests.
    pub fail_create: bool,
    /// Whether to fail update requests.
    pub fail_update: bool,
}

/// A call received by the mock store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// `get` with the requested id.
    Get(String),
    /// `get_all`.
    GetAll,
    /// `create` with the submitted car's id.
    Create(String),
    /// `update` with the path id.
    Update(String),
}

/// Mock car store for testing.
#[derive(Debug, Clone, Default)]
pub struct MockCarStore {
    /// Mock configuration.
    config: MockConfig,
    /// Cars by id.
    cars: Arc<Mutex<HashMap<String, Car>>>,
    /// Calls received, oldest first.
    calls: Arc<Mutex<Vec<StoreCall>>>,
}

impl MockCarStore {
    /// Create a new mock store with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock store with custom configuration.
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Put a car in the mock without recording a call.
    pub fn insert(&self, car: Car) {
        lock(&self.cars).insert(car.id.clone(), car);
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }

    /// Check whether any mutating call was received.
    pub fn was_mutated(&self) -> bool {
        lock(&self.calls)
            .iter()
            .any(|call| matches!(call, StoreCall::Create(_) | StoreCall::Update(_)))
    }

    fn record(&self, call: StoreCall) {
        lock(&self.calls).push(call);
    }
}

impl CarStore for MockCarStore {
    fn get(&self, id: &str) -> Option<Car> {
        self.record(StoreCall::Get(id.to_string()));
        lock(&self.cars).get(id).cloned()
    }

    fn get_all(&self) -> Vec<Car> {
        self.record(StoreCall::GetAll);
        lock(&self.cars).values().cloned().collect()
    }

    fn create(&self, car: Car) -> Result<Car, StoreError> {
        self.record(StoreCall::Create(car.id.clone()));

        if self.config.fail_create || !car.has_id() {
            return Err(StoreError::Creation);
        }

        lock(&self.cars).insert(car.id.clone(), car.clone());
        Ok(car)
    }

    fn update(&self, id: &str, patch: Car) -> Result<Car, StoreError> {
        self.record(StoreCall::Update(id.to_string()));

        let missing = || StoreError::Update { id: id.to_string() };
        if self.config.fail_update {
            return Err(missing());
        }

        let mut cars = lock(&self.cars);
        let car = cars.get_mut(id).ok_or_else(missing)?;
        car.apply_patch(&patch);
        Ok(car.clone())
    }
}

// A panicking test thread must not take later assertions down with it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
