//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── InventoryError   - Domain failures surfaced to the caller         │
//! │  └── ValidationError  - Field-level input failures                     │
//! │                                                                         │
//! │  stockroom-store errors (separate crate)                               │
//! │  └── StoreError       - File I/O + wrapped InventoryError              │
//! │                                                                         │
//! │  Flow: ValidationError → InventoryError → StoreError → CLI message     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product ID, quantities)
//! 3. Every error is recoverable; none of them should end the process

use thiserror::Error;

// =============================================================================
// Inventory Error
// =============================================================================

/// Errors raised by product and inventory operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// A quantity, amount, price or field value broke a construction or
    /// mutation rule.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Tried to sell more than is on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// Sell "E1" × 10
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: "E1", requested: 10, available: 3 }
    ///      │
    ///      ▼
    /// Shell prints the message, stock stays at 3
    /// ```
    #[error("Cannot sell {requested} items of product {product_id}. Only {available} available.")]
    InsufficientStock {
        product_id: String,
        requested: i64,
        available: i64,
    },

    /// An add used an ID that is already held.
    #[error("Product with ID {0} already exists in inventory.")]
    DuplicateProduct(String),

    /// An operation referenced an ID that is not held.
    #[error("Product with ID {0} not found in inventory.")]
    ProductNotFound(String),

    /// A persisted record could not be turned back into a product.
    ///
    /// ## When This Occurs
    /// - Unknown or missing `type` discriminator
    /// - Missing, mistyped or extra fields
    /// - Unparseable `expiry_date`
    /// - Field values that fail construction rules (e.g. price of 0)
    #[error("Invalid product data: {0}")]
    InvalidProductData(String),
}

impl InventoryError {
    /// Creates an InvalidProductData error from anything displayable.
    pub fn invalid_data(message: impl ToString) -> Self {
        InventoryError::InvalidProductData(message.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Produced by the `validation` module and wrapped into
/// [`InventoryError::InvalidArgument`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} cannot be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., unparseable date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Arithmetic on the value would overflow.
    #[error("{field} is too large")]
    Overflow { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with InventoryError.
pub type InventoryResult<T> = Result<T, InventoryError>;

// =============================================================================
// Unit Tests
// =============================================================================
