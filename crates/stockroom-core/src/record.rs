//! # Product Records
//!
//! Flat key/value form of products and the whole-inventory snapshot
//! document written to disk.
//!
//! ## Record Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {                                                                      │
//! │    "product_id": "G1",                                                  │
//! │    "name": "Milk",                     ◄── shared fields                │
//! │    "price": 1.5,                                                        │
//! │    "quantity_in_stock": 12,                                             │
//! │    "type": "Grocery",                  ◄── discriminator                │
//! │    "expiry_date": "2026-10-20T00:00:00" ◄── variant fields              │
//! │  }                                                                      │
//! │                                                                         │
//! │  Electronics: warranty_years, brand                                     │
//! │  Grocery:     expiry_date (ISO-8601)                                    │
//! │  Clothing:    size, material                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`Product::from_record`] is the exact inverse of [`Product::to_record`].
//! Decoding never touches a live inventory: [`Inventory::from_snapshot`]
//! builds a fresh one, so callers swap it in only when every record decoded.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{InventoryError, InventoryResult, ValidationError};
use crate::inventory::Inventory;
use crate::money::{Money, MAX_PRICE};
use crate::product::{Product, ProductKind, ProductType};

/// A single serialized product.
pub type ProductRecord = Map<String, Value>;

/// Format written for grocery expiry dates. The fraction is omitted when zero.
const EXPIRY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

// =============================================================================
// Snapshot
// =============================================================================

/// The persisted document: `{"products": [record, ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// A missing key reads as an empty list.
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

impl InventorySnapshot {
    /// Parses a snapshot document.
    ///
    /// Malformed JSON, a non-object top level, or a non-array `products`
    /// value all fail with `InvalidProductData`.
    pub fn from_json(json: &str) -> InventoryResult<Self> {
        serde_json::from_str(json).map_err(InventoryError::invalid_data)
    }

    /// Renders the snapshot with two-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Inventory {
    /// Serializes every held product in iteration order.
    pub fn to_snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            products: self.iter().map(Product::to_record).collect(),
        }
    }

    /// Builds a new inventory from a snapshot.
    ///
    /// ## Flow
    /// ```text
    /// for record in snapshot.products
    ///   │
    ///   ├── Product::from_record(record)   → InvalidProductData on bad data
    ///   │
    ///   └── inventory.add(product)         → DuplicateProduct on repeated id
    /// ```
    ///
    /// The first failure aborts the whole build; nothing partial escapes.
    pub fn from_snapshot(snapshot: InventorySnapshot) -> InventoryResult<Inventory> {
        let mut inventory = Inventory::new();
        for record in snapshot.products {
            inventory.add(Product::from_record(record)?)?;
        }
        Ok(inventory)
    }
}

// =============================================================================
// Record Encoding
// =============================================================================

impl Product {
    /// Converts the product to its flat record, `type` included.
    pub fn to_record(&self) -> ProductRecord {
        let mut record = Map::new();
        record.insert("product_id".into(), Value::from(self.product_id()));
        record.insert("name".into(), Value::from(self.name()));
        record.insert("price".into(), Value::from(self.price().to_major_units()));
        record.insert(
            "quantity_in_stock".into(),
            Value::from(self.quantity_in_stock()),
        );
        record.insert("type".into(), Value::from(self.product_type().as_str()));

        match self.kind() {
            ProductKind::Electronics {
                warranty_years,
                brand,
            } => {
                record.insert("warranty_years".into(), Value::from(*warranty_years));
                record.insert("brand".into(), Value::from(brand.as_str()));
            }
            ProductKind::Grocery { expiry_date } => {
                record.insert(
                    "expiry_date".into(),
                    Value::from(format_expiry_date(expiry_date)),
                );
            }
            ProductKind::Clothing { size, material } => {
                record.insert("size".into(), Value::from(size.as_str()));
                record.insert("material".into(), Value::from(material.as_str()));
            }
        }

        record
    }

    /// Rebuilds a product from its record.
    ///
    /// Reads and removes `type`, decodes the remaining fields for that
    /// variant, then runs the normal constructor so loaded data obeys the
    /// same rules as operator input. Every failure is `InvalidProductData`.
    pub fn from_record(mut record: ProductRecord) -> InventoryResult<Product> {
        let product_type = match record.remove("type") {
            Some(Value::String(tag)) => tag.parse::<ProductType>()?,
            Some(other) => {
                return Err(InventoryError::invalid_data(format!(
                    "Unknown product type: {}",
                    other
                )))
            }
            None => {
                return Err(InventoryError::invalid_data(
                    "Unknown product type: None",
                ))
            }
        };

        let fields = Value::Object(record);
        let product = match product_type {
            ProductType::Electronics => {
                let r: ElectronicsFields = decode(fields)?;
                Product::electronics(
                    r.product_id,
                    r.name,
                    decode_price(r.price)?,
                    r.quantity_in_stock,
                    r.warranty_years,
                    r.brand,
                )
            }
            ProductType::Grocery => {
                let r: GroceryFields = decode(fields)?;
                let expiry_date = parse_expiry_date(&r.expiry_date)?;
                Product::grocery(
                    r.product_id,
                    r.name,
                    decode_price(r.price)?,
                    r.quantity_in_stock,
                    expiry_date,
                )
            }
            ProductType::Clothing => {
                let r: ClothingFields = decode(fields)?;
                Product::clothing(
                    r.product_id,
                    r.name,
                    decode_price(r.price)?,
                    r.quantity_in_stock,
                    r.size,
                    r.material,
                )
            }
        };

        product.map_err(|err| match err {
            InventoryError::InvalidArgument(reason) => InventoryError::invalid_data(reason),
            other => other,
        })
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ElectronicsFields {
    product_id: String,
    name: String,
    price: f64,
    quantity_in_stock: i64,
    warranty_years: u32,
    brand: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GroceryFields {
    product_id: String,
    name: String,
    price: f64,
    quantity_in_stock: i64,
    expiry_date: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ClothingFields {
    product_id: String,
    name: String,
    price: f64,
    quantity_in_stock: i64,
    size: String,
    material: String,
}

fn decode<T: DeserializeOwned>(fields: Value) -> InventoryResult<T> {
    serde_json::from_value(fields).map_err(InventoryError::invalid_data)
}

/// Converts a stored price to cents.
///
/// A positive price below half a cent would otherwise surface as the
/// misleading "price must be positive", so it gets its own message.
fn decode_price(price: f64) -> InventoryResult<Money> {
    let money = Money::from_major_units(price)
        .ok_or_else(|| InventoryError::invalid_data(format!("price {} is out of range", price)))?;

    if price > 0.0 && money.is_zero() {
        return Err(InventoryError::invalid_data(format!(
            "price {} rounds to zero at cent precision",
            price
        )));
    }
    Ok(money)
}

// =============================================================================
// Expiry Dates
// =============================================================================

/// Formats an expiry date as ISO-8601, e.g. `2026-10-20T00:00:00`.
pub fn format_expiry_date(expiry_date: &NaiveDateTime) -> String {
    expiry_date.format(EXPIRY_FORMAT).to_string()
}

/// Parses an ISO-8601 expiry date.
///
/// ## Accepted Forms
/// - `2026-10-20T18:30:00` (optionally with a fraction)
/// - `2026-10-20 18:30:00` (space separator)
/// - `2026-10-20` (midnight)
///
/// ## Example
/// ```rust
/// use stockroom_core::record::parse_expiry_date;
///
/// let a = parse_expiry_date("2026-10-20")?;
/// let b = parse_expiry_date("2026-10-20T00:00:00")?;
/// assert_eq!(a, b);
/// # Ok::<(), stockroom_core::InventoryError>(())
/// ```
pub fn parse_expiry_date(value: &str) -> InventoryResult<NaiveDateTime> {
    let value = value.trim();

    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, EXPIRY_FORMAT) {
        return Ok(parsed);
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(parsed);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(InventoryError::invalid_data(ValidationError::InvalidFormat {
        field: "expiry_date".to_string(),
        reason: format!("'{}' is not an ISO-8601 date", value),
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn record(value: Value) -> ProductRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_electronics_record_shape() {
        let product =
            Product::electronics("E1", "Laptop", Money::from_cents(10000), 5, 2, "Acme").unwrap();

        assert_eq!(
            Value::Object(product.to_record()),
            json!({
                "product_id": "E1",
                "name": "Laptop",
                "price": 100.0,
                "quantity_in_stock": 5,
                "type": "Electronics",
                "warranty_years": 2,
                "brand": "Acme"
            })
        );
    }

    #[test]
    fn test_grocery_record_uses_iso_datetime() {
        let product = Product::grocery(
            "G1",
            "Milk",
            Money::from_cents(150),
            12,
            at(2026, 10, 20, 0, 0, 0),
        )
        .unwrap();

        let rec = product.to_record();
        assert_eq!(rec["type"], json!("Grocery"));
        assert_eq!(rec["expiry_date"], json!("2026-10-20T00:00:00"));
        assert_eq!(rec["price"], json!(1.5));
    }

    #[test]
    fn test_record_round_trip_every_variant() {
        let prices = [1, 99, 150, 1999, 10000, 123456789];
        let stocks = [0, 1, 3, 250, 100000];

        for (i, cents) in prices.iter().enumerate() {
            for (j, stock) in stocks.iter().enumerate() {
                let id = format!("P{}-{}", i, j);
                let price = Money::from_cents(*cents);
                let expiry = at(2020 + i as i32, 1 + j as u32, 1 + (i * j) as u32, 13, 5, 59)
                    .with_nanosecond(((i * 7 + j) * 1000) as u32)
                    .unwrap();

                let products = [
                    Product::electronics(&id, "Phone", price, *stock, j as u32, "Brand X")
                        .unwrap(),
                    Product::grocery(&id, "Apples", price, *stock, expiry).unwrap(),
                    Product::clothing(&id, "Jacket", price, *stock, "XL", "Wool").unwrap(),
                ];

                for product in products {
                    let rebuilt = Product::from_record(product.to_record()).unwrap();
                    assert_eq!(rebuilt, product);
                    assert_eq!(rebuilt.to_record(), product.to_record());
                }
            }
        }

        // Top of the accepted price range
        let max = MAX_PRICE.cents();
        for cents in [max, max - 1, max - 99, max / 2 + 1, (1 << 47) + 3] {
            for stock in [0, 1, 3] {
                let price = Money::from_cents(cents);
                let products = [
                    Product::electronics("E", "Phone", price, stock, 1, "Brand X").unwrap(),
                    Product::grocery("G", "Apples", price, stock, at(2030, 1, 1, 0, 0, 0))
                        .unwrap(),
                    Product::clothing("C", "Jacket", price, stock, "XL", "Wool").unwrap(),
                ];

                for product in products {
                    let rebuilt = Product::from_record(product.to_record()).unwrap();
                    assert_eq!(rebuilt.price(), price);
                    assert_eq!(rebuilt, product);
                }
            }
        }
    }

    #[test]
    fn test_price_above_max_is_rejected() {
        let err = Product::clothing("C1", "Coat", Money::from_cents(MAX_PRICE.cents() + 1), 1, "L", "Wool")
            .unwrap_err();
        assert!(matches!(
            err,
            InventoryError::InvalidArgument(ValidationError::Overflow { .. })
        ));

        let too_big = Money::from_cents(MAX_PRICE.cents() + 1000).to_major_units();
        let err = Product::from_record(record(json!({
            "product_id": "C1", "name": "Coat", "price": too_big, "quantity_in_stock": 1,
            "type": "Clothing", "size": "L", "material": "Wool"
        })))
        .unwrap_err();
        assert!(matches!(err, InventoryError::InvalidProductData(_)));
        assert!(err.to_string().contains("price is too large"));
    }

    #[test]
    fn test_sub_cent_price_is_reported() {
        let err = Product::from_record(record(json!({
            "product_id": "C1", "name": "Button", "price": 0.004, "quantity_in_stock": 100,
            "type": "Clothing", "size": "S", "material": "Bone"
        })))
        .unwrap_err();

        assert!(matches!(err, InventoryError::InvalidProductData(_)));
        assert!(err.to_string().contains("rounds to zero"));
        assert!(!err.to_string().contains("must be positive"));

        // Half a cent rounds up and is accepted
        let button = Product::from_record(record(json!({
            "product_id": "C2", "name": "Button", "price": 0.005, "quantity_in_stock": 100,
            "type": "Clothing", "size": "S", "material": "Bone"
        })))
        .unwrap();
        assert_eq!(button.price(), Money::from_cents(1));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let err = Product::from_record(record(json!({
            "product_id": "F1",
            "name": "Chair",
            "price": 50.0,
            "quantity_in_stock": 2,
            "type": "Furniture"
        })))
        .unwrap_err();

        assert!(matches!(err, InventoryError::InvalidProductData(_)));
        assert!(err.to_string().contains("Unknown product type: Furniture"));
    }

    #[test]
    fn test_missing_or_non_string_type_is_rejected() {
        let err = Product::from_record(record(json!({"product_id": "X"}))).unwrap_err();
        assert!(err.to_string().contains("Unknown product type: None"));

        let err = Product::from_record(record(json!({"type": 7}))).unwrap_err();
        assert!(err.to_string().contains("Unknown product type: 7"));
    }

    #[test]
    fn test_bad_fields_are_invalid_data() {
        let cases = [
            // missing brand
            json!({"product_id": "E1", "name": "TV", "price": 10.0, "quantity_in_stock": 1,
                   "type": "Electronics", "warranty_years": 1}),
            // negative warranty
            json!({"product_id": "E1", "name": "TV", "price": 10.0, "quantity_in_stock": 1,
                   "type": "Electronics", "warranty_years": -1, "brand": "B"}),
            // zero price fails construction
            json!({"product_id": "C1", "name": "Hat", "price": 0.0, "quantity_in_stock": 1,
                   "type": "Clothing", "size": "M", "material": "Felt"}),
            // negative stock fails construction
            json!({"product_id": "C1", "name": "Hat", "price": 1.0, "quantity_in_stock": -2,
                   "type": "Clothing", "size": "M", "material": "Felt"}),
            // unknown extra field
            json!({"product_id": "C1", "name": "Hat", "price": 1.0, "quantity_in_stock": 2,
                   "type": "Clothing", "size": "M", "material": "Felt", "color": "red"}),
            // unparseable date
            json!({"product_id": "G1", "name": "Egg", "price": 1.0, "quantity_in_stock": 2,
                   "type": "Grocery", "expiry_date": "next tuesday"}),
        ];

        for case in cases {
            let err = Product::from_record(record(case)).unwrap_err();
            assert!(
                matches!(err, InventoryError::InvalidProductData(_)),
                "expected InvalidProductData, got {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_expiry_date_forms() {
        let midnight = at(2026, 10, 20, 0, 0, 0);
        assert_eq!(parse_expiry_date("2026-10-20").unwrap(), midnight);
        assert_eq!(parse_expiry_date("2026-10-20T00:00:00").unwrap(), midnight);
        assert_eq!(parse_expiry_date("2026-10-20 00:00:00").unwrap(), midnight);

        let precise = parse_expiry_date("2026-10-20T18:30:05.250000").unwrap();
        assert_eq!(precise.nanosecond(), 250_000_000);
        assert_eq!(format_expiry_date(&precise), "2026-10-20T18:30:05.250");

        let err = parse_expiry_date("20/10/2026").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid product data: expiry_date has invalid format: '20/10/2026' is not an ISO-8601 date"
        );
    }

    #[test]
    fn test_snapshot_from_json() {
        let snapshot = InventorySnapshot::from_json("{}").unwrap();
        assert!(snapshot.products.is_empty());

        assert!(matches!(
            InventorySnapshot::from_json("{not json"),
            Err(InventoryError::InvalidProductData(_))
        ));
        assert!(matches!(
            InventorySnapshot::from_json(r#"{"products": {"a": 1}}"#),
            Err(InventoryError::InvalidProductData(_))
        ));
        assert!(matches!(
            InventorySnapshot::from_json(r#"{"products": [1, 2]}"#),
            Err(InventoryError::InvalidProductData(_))
        ));
    }

    #[test]
    fn test_from_snapshot_rejects_duplicate_ids() {
        let shirt =
            Product::clothing("C1", "Shirt", Money::from_cents(999), 1, "S", "Cotton").unwrap();
        let snapshot = InventorySnapshot {
            products: vec![shirt.to_record(), shirt.to_record()],
        };

        let err = Inventory::from_snapshot(snapshot).unwrap_err();
        assert!(matches!(err, InventoryError::DuplicateProduct(id) if id == "C1"));
    }

    #[test]
    fn test_snapshot_pretty_print_uses_two_spaces() {
        let mut inventory = Inventory::new();
        inventory
            .add(Product::clothing("C1", "Shirt", Money::from_cents(999), 1, "S", "Cotton").unwrap())
            .unwrap();

        let json = inventory.to_snapshot().to_json_pretty().unwrap();
        assert!(json.starts_with("{\n  \"products\": [\n    {\n      \"product_id\": \"C1\""));
    }
}
