//! # stockroom-core: Inventory Domain Logic
//!
//! Products, stock rules, the keyed inventory, and the record form used for
//! persistence. Nothing in this crate touches the file system.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (menu shell)                        │   │
//! │  │    prompts ──► inventory operations ──► printed results         │   │
//! │  └───────────────┬─────────────────────────────┬───────────────────┘   │
//! │                  │                             │ save / load            │
//! │                  │               ┌─────────────▼───────────────────┐   │
//! │                  │               │  stockroom-store (JSON file)    │   │
//! │                  │               └─────────────┬───────────────────┘   │
//! │  ┌───────────────▼─────────────────────────────▼───────────────────┐   │
//! │  │             ★ stockroom-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  product  │  │ inventory │  │  record   │  │   money   │  │   │
//! │  │   │  Product  │  │ Inventory │  │ Snapshot  │  │   Money   │  │   │
//! │  │   │   Kind    │  │  search   │  │  Record   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO STDIN • NO NETWORK                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`product`] - The three product variants and their sell/restock rules
//! - [`inventory`] - Keyed store with search, valuation and expiry sweep
//! - [`record`] - Flat records and the snapshot document
//! - [`money`] - Integer money (minor units)
//! - [`error`] - Domain error types
//! - [`validation`] - Field and quantity rules
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::{Inventory, Money, Product};
//!
//! let mut inventory = Inventory::new();
//! inventory.add(Product::electronics("E1", "Laptop", Money::from_cents(10000), 5, 2, "Acme")?)?;
//!
//! let total = inventory.sell("E1", 2)?;
//! assert_eq!(total.to_string(), "Rs.200.00");
//!
//! inventory.restock("E1", 4)?;
//! assert_eq!(inventory.total_value()?, Money::from_cents(70000));
//! # Ok::<(), stockroom_core::InventoryError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod money;
pub mod product;
pub mod record;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{InventoryError, InventoryResult, ValidationError};
pub use inventory::Inventory;
pub use money::Money;
pub use product::{Product, ProductKind, ProductType};
pub use record::{InventorySnapshot, ProductRecord};
