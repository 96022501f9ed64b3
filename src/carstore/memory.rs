//! InMemoryCarStore - DashMap-backed production store.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{fixtures, Car, CarStore};
use crate::error::StoreError;

/// In-memory car store.
///
/// Each create and each update read-merge-write happens under the shard
/// lock of its key. Clone-friendly via Arc; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCarStore {
    cars: Arc<DashMap<String, Car>>,
}

impl InMemoryCarStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `cars`.
    ///
    /// Entries without an identifier are skipped. Later duplicates replace
    /// earlier ones.
    pub fn with_cars(cars: impl IntoIterator<Item = Car>) -> Self {
        let store = Self::new();
        for car in cars {
            if !car.has_id() {
                warn!("Skipping seed car without id");
                continue;
            }
            store.cars.insert(car.id.clone(), car);
        }
        store
    }

    /// Create a store holding the two fixture cars.
    pub fn seeded() -> Self {
        Self::with_cars(fixtures::initial_cars())
    }

    /// Create a store, seeding it only when `seed` is set.
    pub fn from_seed_flag(seed: bool) -> Self {
        if seed {
            Self::seeded()
        } else {
            Self::new()
        }
    }

    /// Number of stored cars.
    pub fn len(&self) -> usize {
        self.cars.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }
}

impl CarStore for InMemoryCarStore {
    fn get(&self, id: &str) -> Option<Car> {
        self.cars.get(id).map(|entry| entry.value().clone())
    }

    fn get_all(&self) -> Vec<Car> {
        self.cars.iter().map(|entry| entry.value().clone()).collect()
    }

    fn create(&self, car: Car) -> Result<Car, StoreError> {
        if !car.has_id() {
            return Err(StoreError::Creation);
        }

        debug!(id = %car.id, "Storing car");
        self.cars.insert(car.id.clone(), car.clone());
        Ok(car)
    }

    fn update(&self, id: &str, patch: Car) -> Result<Car, StoreError> {
        let mut entry = self.cars.get_mut(id).ok_or_else(|| StoreError::Update {
            id: id.to_string(),
        })?;

        entry.apply_patch(&patch);
        debug!(id, "Merged patch into car");
        Ok(entry.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn car(id: &str, make: &str) -> Car {
        Car {
            id: id.to_string(),
            make: make.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn new_store_is_empty() {
        let store = InMemoryCarStore::new();
        assert!(store.is_empty());
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn created_car_is_retrievable() {
        let store = InMemoryCarStore::new();
        let want = Car {
            id: "Xyz123".to_string(),
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2022,
            ..Default::default()
        };

        let created = store.create(want.clone()).unwrap();

        assert_eq!(created, want);
        assert_eq!(store.get("Xyz123"), Some(want));
    }

    #[test]
    fn create_without_id_fails_and_adds_nothing() {
        let store = InMemoryCarStore::new();

        let result = store.create(car("", "Ford"));

        assert_eq!(result, Err(StoreError::Creation));
        assert!(store.is_empty());
    }

    #[test]
    fn create_with_existing_id_replaces_entirely() {
        let store = InMemoryCarStore::new();
        store
            .create(Car {
                id: "a".to_string(),
                make: "Ford".to_string(),
                mileage: 500,
                ..Default::default()
            })
            .unwrap();

        store.create(car("a", "Honda")).unwrap();

        let stored = store.get("a").unwrap();
        assert_eq!(stored.make, "Honda");
        assert_eq!(stored.mileage, 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_missing_returns_none() {
        let store = InMemoryCarStore::seeded();
        assert_eq!(store.get("missing-key"), None);
    }

    #[test]
    fn update_merges_and_keeps_path_id() {
        let store = InMemoryCarStore::with_cars([Car {
            id: "Xyz1234".to_string(),
            make: "Toyota".to_string(),
            color: "Silver".to_string(),
            year: 2022,
            mileage: 1000,
            ..Default::default()
        }]);

        let updated = store
            .update(
                "Xyz1234",
                Car {
                    id: "ignored".to_string(),
                    color: "Gold".to_string(),
                    mileage: 3000,
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, "Xyz1234");
        assert_eq!(updated.color, "Gold");
        assert_eq!(updated.mileage, 3000);
        assert_eq!(updated.make, "Toyota");
        assert_eq!(updated.year, 2022);
        assert_eq!(store.get("Xyz1234"), Some(updated));
        assert_eq!(store.get("ignored"), None);
    }

    #[test]
    fn update_missing_fails_and_leaves_store_unchanged() {
        let store = InMemoryCarStore::seeded();
        let before = store.len();

        let result = store.update("nope", car("nope", "Ford"));

        assert_eq!(
            result,
            Err(StoreError::Update {
                id: "nope".to_string()
            })
        );
        assert_eq!(store.len(), before);
        assert_eq!(store.get("nope"), None);
    }

    #[test]
    fn seeded_store_holds_fixtures_under_their_ids() {
        let store = InMemoryCarStore::seeded();
        assert_eq!(store.len(), 2);
        for car in store.get_all() {
            assert_eq!(store.get(&car.id), Some(car.clone()));
        }
        assert_eq!(store.get("JHk290Xj").unwrap().make, "Ford");
    }

    #[test]
    fn with_cars_skips_entries_without_id() {
        let store = InMemoryCarStore::with_cars([car("", "Ford"), car("b", "Kia")]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn seed_flag_selects_fixtures() {
        assert!(InMemoryCarStore::from_seed_flag(false).is_empty());
        assert_eq!(InMemoryCarStore::from_seed_flag(true).len(), 2);
    }

    #[test]
    fn clones_share_storage() {
        let store = InMemoryCarStore::new();
        let other = store.clone();
        store.create(car("a", "Ford")).unwrap();
        assert_eq!(other.get("a").map(|c| c.make), Some("Ford".to_string()));
    }
}
