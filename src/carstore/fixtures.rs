//! Fixture cars used to seed a demo store.

use super::Car;

/// The two cars a seeded store starts with.
pub fn initial_cars() -> Vec<Car> {
    vec![
        Car {
            make: "Ford".to_string(),
            model: "F10".to_string(),
            package: "Base".to_string(),
            color: "Silver".to_string(),
            year: 2010,
            category: "Truck".to_string(),
            mileage: 120123,
            price: 1999900,
            id: "JHk290Xj".to_string(),
        },
        Car {
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            package: "SE".to_string(),
            color: "White".to_string(),
            year: 2019,
            category: "Sedan".to_string(),
            mileage: 3999,
            price: 2899000,
            id: "fWl37la".to_string(),
        },
    ]
}
