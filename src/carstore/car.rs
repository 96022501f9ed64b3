//! Vehicle record and the patch rule used by updates.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Wire keys of [`Car`], in declaration order.
const FIELD_KEYS: [&str; 9] = [
    "Make", "Model", "Package", "Color", "Year", "Category", "Mileage", "Price", "Id",
];

/// A single vehicle.
///
/// Serialized with PascalCase keys (`Make`, `Model`, ..., `Id`). Every key is
/// optional on input: missing strings decode as `""` and missing numbers as
/// `0`. Request bodies go through [`Car::from_json`], which also accepts keys
/// in any case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct Car {
    /// Manufacturer, e.g. "Toyota".
    #[schema(example = "Toyota")]
    pub make: String,
    /// Model name, e.g. "Camry".
    #[schema(example = "Camry")]
    pub model: String,
    /// Trim or package, e.g. "SE".
    #[schema(example = "SE")]
    pub package: String,
    /// Exterior color.
    #[schema(example = "Silver")]
    pub color: String,
    /// Model year.
    #[schema(example = 2022)]
    pub year: i64,
    /// Body category, e.g. "Sedan" or "Truck".
    #[schema(example = "Sedan")]
    pub category: String,
    /// Odometer reading.
    #[schema(example = 1000)]
    pub mileage: i64,
    /// Price in cents.
    #[schema(example = 2999000)]
    pub price: i64,
    /// Unique identifier. Required on create.
    #[schema(example = "Xyz1234")]
    pub id: String,
}

impl Car {
    /// Decode a car from a JSON body, matching keys without regard to case.
    ///
    /// `Id`, `id` and `ID` all name the identifier. When a field is named more
    /// than once the last occurrence wins. A `null` body decodes as the empty
    /// car.
    pub fn from_json(body: &[u8]) -> serde_json::Result<Car> {
        match serde_json::from_slice::<Option<FoldedFields>>(body)? {
            Some(FoldedFields(fields)) => serde_json::from_value(Value::Object(fields)),
            None => Ok(Car::default()),
        }
    }

    /// Check whether the record carries an identifier.
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// Overwrite fields of `self` with the non-empty fields of `patch`.
    ///
    /// Empty strings and zero numbers in `patch` mean "not provided", so a
    /// field can never be cleared this way. `id` is never touched.
    pub fn apply_patch(&mut self, patch: &Car) {
        patch_text(&mut self.make, &patch.make);
        patch_text(&mut self.model, &patch.model);
        patch_text(&mut self.package, &patch.package);
        patch_text(&mut self.color, &patch.color);
        patch_number(&mut self.year, patch.year);
        patch_text(&mut self.category, &patch.category);
        patch_number(&mut self.mileage, patch.mileage);
        patch_number(&mut self.price, patch.price);
    }
}

fn patch_text(target: &mut String, value: &str) {
    if !value.is_empty() {
        target.clear();
        target.push_str(value);
    }
}

fn patch_number(target: &mut i64, value: i64) {
    if value != 0 {
        *target = value;
    }
}

/// Object fields with every key that names a [`Car`] field rewritten to its
/// canonical spelling.
struct FoldedFields(Map<String, Value>);

fn canonical_key(key: &str) -> Option<&'static str> {
    FIELD_KEYS
        .iter()
        .copied()
        .find(|field| field.eq_ignore_ascii_case(key))
}

impl<'de> Deserialize<'de> for FoldedFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = FoldedFields;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut fields = Map::new();
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    let key = match canonical_key(&key) {
                        Some(field) => field.to_string(),
                        None => key,
                    };
                    fields.insert(key, value);
                }
                Ok(FoldedFields(fields))
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}
