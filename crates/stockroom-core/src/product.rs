//! # Product Model
//!
//! The three product variants the inventory tracks, and the stock rules
//! every variant shares.
//!
//! ## Type Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Product                                         │
//! │  ─────────────────────────────────────────────────────────────────      │
//! │  product_id (immutable key)   name   price (Money)   quantity_in_stock  │
//! │                                                                         │
//! │  kind: ProductKind                                                      │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │  Electronics    │   │    Grocery      │   │    Clothing     │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  warranty_years │   │  expiry_date    │   │  size           │        │
//! │  │  brand          │   │  (is_expired is │   │  material       │        │
//! │  │                 │   │   computed)     │   │                 │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fields are private. Stock changes only through [`Product::sell`] and
//! [`Product::restock`], which keeps `quantity_in_stock >= 0` and
//! `price × quantity_in_stock` representable at all times.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};

use crate::error::{InventoryError, InventoryResult, ValidationError};
use crate::money::{Money, DEFAULT_CURRENCY_SYMBOL};
use crate::validation::{
    validate_price, validate_product_id, validate_product_name, validate_restock_amount,
    validate_sale_quantity, validate_stock,
};

// =============================================================================
// Product Type
// =============================================================================

/// The variant tag of a product, used for type searches and as the
/// serialized `type` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductType {
    Electronics,
    Grocery,
    Clothing,
}

impl ProductType {
    /// Every variant, in menu order.
    pub const ALL: [ProductType; 3] = [
        ProductType::Electronics,
        ProductType::Grocery,
        ProductType::Clothing,
    ];

    /// Returns the discriminator string written to records.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductType::Electronics => "Electronics",
            ProductType::Grocery => "Grocery",
            ProductType::Clothing => "Clothing",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the exact discriminator string; anything else is rejected.
impl FromStr for ProductType {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Electronics" => Ok(ProductType::Electronics),
            "Grocery" => Ok(ProductType::Grocery),
            "Clothing" => Ok(ProductType::Clothing),
            other => Err(InventoryError::invalid_data(format!(
                "Unknown product type: {}",
                other
            ))),
        }
    }
}

// =============================================================================
// Product Kind
// =============================================================================

/// Variant-specific attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductKind {
    Electronics { warranty_years: u32, brand: String },
    Grocery { expiry_date: NaiveDateTime },
    Clothing { size: String, material: String },
}

impl ProductKind {
    /// Returns the tag for this variant.
    pub const fn product_type(&self) -> ProductType {
        match self {
            ProductKind::Electronics { .. } => ProductType::Electronics,
            ProductKind::Grocery { .. } => ProductType::Grocery,
            ProductKind::Clothing { .. } => ProductType::Clothing,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A stocked product of one of the three variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    product_id: String,
    name: String,
    price: Money,
    quantity_in_stock: i64,
    kind: ProductKind,
}

impl Product {
    /// Creates a product after validating the shared fields.
    ///
    /// ## Rules
    /// - `product_id` and `name` must not be blank
    /// - `price` must be positive
    /// - `quantity_in_stock` must not be negative
    /// - `price × quantity_in_stock` must fit in [`Money`]
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        quantity_in_stock: i64,
        kind: ProductKind,
    ) -> InventoryResult<Self> {
        let product_id = product_id.into();
        let name = name.into();

        validate_product_id(&product_id)?;
        validate_product_name(&name)?;
        validate_price(price)?;
        validate_stock(quantity_in_stock)?;
        ensure_valuable(price, quantity_in_stock)?;

        Ok(Product {
            product_id,
            name,
            price,
            quantity_in_stock,
            kind,
        })
    }

    /// Creates an electronics product.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::{Money, Product, ProductType};
    ///
    /// let laptop = Product::electronics("E1", "Laptop", Money::from_cents(10000), 5, 2, "Acme")?;
    /// assert_eq!(laptop.product_type(), ProductType::Electronics);
    /// assert_eq!(laptop.total_value(), Money::from_cents(50000));
    /// # Ok::<(), stockroom_core::InventoryError>(())
    /// ```
    pub fn electronics(
        product_id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        quantity_in_stock: i64,
        warranty_years: u32,
        brand: impl Into<String>,
    ) -> InventoryResult<Self> {
        Product::new(
            product_id,
            name,
            price,
            quantity_in_stock,
            ProductKind::Electronics {
                warranty_years,
                brand: brand.into(),
            },
        )
    }

    /// Creates a grocery product that expires at `expiry_date` (local time).
    pub fn grocery(
        product_id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        quantity_in_stock: i64,
        expiry_date: NaiveDateTime,
    ) -> InventoryResult<Self> {
        Product::new(
            product_id,
            name,
            price,
            quantity_in_stock,
            ProductKind::Grocery { expiry_date },
        )
    }

    /// Creates a clothing product.
    pub fn clothing(
        product_id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        quantity_in_stock: i64,
        size: impl Into<String>,
        material: impl Into<String>,
    ) -> InventoryResult<Self> {
        Product::new(
            product_id,
            name,
            price,
            quantity_in_stock,
            ProductKind::Clothing {
                size: size.into(),
                material: material.into(),
            },
        )
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    #[inline]
    pub fn quantity_in_stock(&self) -> i64 {
        self.quantity_in_stock
    }

    #[inline]
    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    #[inline]
    pub fn product_type(&self) -> ProductType {
        self.kind.product_type()
    }

    /// Returns the expiry date for groceries, `None` for other variants.
    pub fn expiry_date(&self) -> Option<NaiveDateTime> {
        match self.kind {
            ProductKind::Grocery { expiry_date } => Some(expiry_date),
            _ => None,
        }
    }

    // =========================================================================
    // Stock Operations
    // =========================================================================

    /// Sells `quantity` units and returns the sale total.
    ///
    /// ## Flow
    /// ```text
    /// sell(qty)
    ///   │
    ///   ├── qty <= 0?      → InvalidArgument
    ///   ├── qty > stock?   → InsufficientStock { requested, available }
    ///   │
    ///   └── stock -= qty, return price × qty
    /// ```
    ///
    /// Nothing changes when an error is returned.
    pub fn sell(&mut self, quantity: i64) -> InventoryResult<Money> {
        validate_sale_quantity(quantity)?;

        if quantity > self.quantity_in_stock {
            return Err(InventoryError::InsufficientStock {
                product_id: self.product_id.clone(),
                requested: quantity,
                available: self.quantity_in_stock,
            });
        }

        // qty <= stock and price × stock fits, so this cannot overflow
        let total = self.price * quantity;
        self.quantity_in_stock -= quantity;
        Ok(total)
    }

    /// Adds `amount` units to stock.
    ///
    /// Fails with `InvalidArgument` for non-positive amounts, or when the new
    /// stock level could no longer be valued.
    pub fn restock(&mut self, amount: i64) -> InventoryResult<()> {
        validate_restock_amount(amount)?;

        let new_quantity = self
            .quantity_in_stock
            .checked_add(amount)
            .ok_or_else(|| overflow("quantity_in_stock"))?;
        ensure_valuable(self.price, new_quantity)?;

        self.quantity_in_stock = new_quantity;
        Ok(())
    }

    /// Value of the stock on hand (`price × quantity_in_stock`).
    pub fn total_value(&self) -> Money {
        self.price * self.quantity_in_stock
    }

    /// Returns true for groceries whose expiry date has passed.
    ///
    /// Reads the local wall clock on every call, so the answer changes as
    /// time moves on. Non-grocery products never expire.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Local::now().naive_local())
    }

    /// Returns true when `now` is strictly after the grocery expiry date.
    pub fn is_expired_at(&self, now: NaiveDateTime) -> bool {
        match self.kind {
            ProductKind::Grocery { expiry_date } => now > expiry_date,
            _ => false,
        }
    }

    // =========================================================================
    // Display
    // =========================================================================

    /// Returns a displayable block that prefixes prices with `currency_symbol`.
    pub fn display_with<'a>(&'a self, currency_symbol: &'a str) -> ProductDisplay<'a> {
        ProductDisplay {
            product: self,
            currency_symbol,
        }
    }
}

fn ensure_valuable(price: Money, quantity: i64) -> Result<(), ValidationError> {
    match price.checked_mul(quantity) {
        Some(_) => Ok(()),
        None => Err(overflow("quantity_in_stock")),
    }
}

fn overflow(field: &str) -> ValidationError {
    ValidationError::Overflow {
        field: field.to_string(),
    }
}

/// Multi-line human-readable product block.
///
/// ```text
/// Product ID: G1
/// Name: Milk
/// Price: Rs.1.50
/// Stock: 12
/// Expiry Date: 2026-10-20
/// Status: Valid
/// ```
pub struct ProductDisplay<'a> {
    product: &'a Product,
    currency_symbol: &'a str,
}

impl fmt::Display for ProductDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.product;
        write!(
            f,
            "Product ID: {}\nName: {}\nPrice: {}\nStock: {}",
            p.product_id,
            p.name,
            p.price.format_with(self.currency_symbol),
            p.quantity_in_stock
        )?;

        match &p.kind {
            ProductKind::Electronics {
                warranty_years,
                brand,
            } => write!(f, "\nBrand: {}\nWarranty: {} years", brand, warranty_years),
            ProductKind::Grocery { expiry_date } => {
                let status = if p.is_expired() { "EXPIRED" } else { "Valid" };
                write!(
                    f,
                    "\nExpiry Date: {}\nStatus: {}",
                    expiry_date.format("%Y-%m-%d"),
                    status
                )
            }
            ProductKind::Clothing { size, material } => {
                write!(f, "\nSize: {}\nMaterial: {}", size, material)
            }
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display_with(DEFAULT_CURRENCY_SYMBOL).fmt(f)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
