//! # stockroom-store: Inventory Persistence
//!
//! Saves and loads a [`stockroom_core::Inventory`] as a single JSON file.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  inventory.json (2-space indent)                                        │
//! │                                                                         │
//! │  {                                                                      │
//! │    "products": [                                                        │
//! │      { "product_id": "E1", ..., "type": "Electronics", ... },           │
//! │      { "product_id": "G1", ..., "type": "Grocery", ... }                │
//! │    ]                                                                    │
//! │  }                                                                      │
//! │                                                                         │
//! │  Records are written in product ID order.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`file`] - The [`InventoryFile`] save/load extension trait
//! - [`error`] - Store error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use file::InventoryFile;
