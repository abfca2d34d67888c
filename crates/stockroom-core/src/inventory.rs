//! # Inventory
//!
//! The keyed product store: one product per unique ID.
//!
//! ## Operation Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Inventory                                       │
//! │                                                                         │
//! │  Mutations                       Queries                                │
//! │  ├── add(product)                ├── get(id)                            │
//! │  ├── remove(id)                  ├── search_by_name(fragment)           │
//! │  ├── sell(id, qty)               ├── search_by_type(type)               │
//! │  ├── restock(id, amount)         ├── list_all()                         │
//! │  └── sweep_expired()             └── total_value()                      │
//! │                                                                         │
//! │  Products are kept in a BTreeMap, so every listing is ordered by ID.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use crate::error::{InventoryError, InventoryResult, ValidationError};
use crate::money::Money;
use crate::product::{Product, ProductType};

/// A collection of products keyed by product ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    products: BTreeMap<String, Product>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product under its own ID.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::{Inventory, InventoryError, Money, Product};
    ///
    /// let mut inventory = Inventory::new();
    /// let shirt = Product::clothing("C1", "Shirt", Money::from_cents(999), 4, "M", "Cotton")?;
    /// inventory.add(shirt.clone())?;
    ///
    /// assert!(matches!(inventory.add(shirt), Err(InventoryError::DuplicateProduct(_))));
    /// # Ok::<(), InventoryError>(())
    /// ```
    pub fn add(&mut self, product: Product) -> InventoryResult<()> {
        match self.products.entry(product.product_id().to_string()) {
            Entry::Occupied(entry) => Err(InventoryError::DuplicateProduct(entry.key().clone())),
            Entry::Vacant(entry) => {
                debug!(product_id = %product.product_id(), kind = %product.product_type(), "Product added");
                entry.insert(product);
                Ok(())
            }
        }
    }

    /// Removes a product and hands it back.
    pub fn remove(&mut self, product_id: &str) -> InventoryResult<Product> {
        let product = self
            .products
            .remove(product_id)
            .ok_or_else(|| not_found(product_id))?;

        debug!(product_id = %product_id, "Product removed");
        Ok(product)
    }

    /// Sells from the identified product and returns the sale total.
    ///
    /// ## Errors
    /// - `ProductNotFound` if the ID is not held
    /// - `InvalidArgument` if `quantity <= 0`
    /// - `InsufficientStock` if `quantity` exceeds stock
    pub fn sell(&mut self, product_id: &str, quantity: i64) -> InventoryResult<Money> {
        let product = self.get_mut(product_id)?;
        let total = product.sell(quantity)?;

        debug!(
            product_id = %product_id,
            quantity,
            remaining = product.quantity_in_stock(),
            total = %total,
            "Sale recorded"
        );
        Ok(total)
    }

    /// Restocks the identified product.
    pub fn restock(&mut self, product_id: &str, amount: i64) -> InventoryResult<()> {
        let product = self.get_mut(product_id)?;
        product.restock(amount)?;

        debug!(
            product_id = %product_id,
            amount,
            stock = product.quantity_in_stock(),
            "Product restocked"
        );
        Ok(())
    }

    /// Removes every expired grocery using the current local time and
    /// returns the removed IDs in ID order.
    pub fn sweep_expired(&mut self) -> Vec<String> {
        self.sweep_expired_at(Local::now().naive_local())
    }

    /// Removes every grocery expired at `now`.
    ///
    /// Expired IDs are collected first and removed afterwards, so the result
    /// does not depend on iteration order.
    pub fn sweep_expired_at(&mut self, now: NaiveDateTime) -> Vec<String> {
        let expired: Vec<String> = self
            .products
            .values()
            .filter(|product| product.is_expired_at(now))
            .map(|product| product.product_id().to_string())
            .collect();

        for product_id in &expired {
            self.products.remove(product_id);
        }

        if !expired.is_empty() {
            debug!(count = expired.len(), "Expired products removed");
        }
        expired
    }

    /// Drops every product.
    pub fn clear(&mut self) {
        self.products.clear();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Looks up a product by exact ID.
    pub fn get(&self, product_id: &str) -> InventoryResult<&Product> {
        self.products
            .get(product_id)
            .ok_or_else(|| not_found(product_id))
    }

    /// Mutable lookup. Stock still changes only through `sell`/`restock`.
    pub fn get_mut(&mut self, product_id: &str) -> InventoryResult<&mut Product> {
        self.products
            .get_mut(product_id)
            .ok_or_else(|| not_found(product_id))
    }

    /// Case-insensitive substring match on product names.
    ///
    /// An empty fragment matches every product.
    pub fn search_by_name(&self, fragment: &str) -> Vec<&Product> {
        let needle = fragment.to_lowercase();
        self.products
            .values()
            .filter(|product| product.name().to_lowercase().contains(&needle))
            .collect()
    }

    /// All products of one variant.
    pub fn search_by_type(&self, product_type: ProductType) -> Vec<&Product> {
        self.products
            .values()
            .filter(|product| product.product_type() == product_type)
            .collect()
    }

    /// Every product, ordered by ID.
    pub fn list_all(&self) -> Vec<&Product> {
        self.products.values().collect()
    }

    /// Sum of `price × quantity_in_stock` over all products.
    ///
    /// Each product's value always fits in [`Money`], but the sum across
    /// products may not; that case is `InvalidArgument(Overflow)`.
    pub fn total_value(&self) -> InventoryResult<Money> {
        self.products
            .values()
            .try_fold(Money::zero(), |total, product| {
                total.checked_add(product.total_value())
            })
            .ok_or_else(|| {
                ValidationError::Overflow {
                    field: "total inventory value".to_string(),
                }
                .into()
            })
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.products.contains_key(product_id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}

fn not_found(product_id: &str) -> InventoryError {
    InventoryError::ProductNotFound(product_id.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
