//! # Validation Module
//!
//! Field validation shared by product construction and stock mutations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI prompts                                                  │
//! │  ├── Parse numbers and dates                                           │
//! │  └── Re-ask until the operator types something usable                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Product constructors (price, stock, id, name)                     │
//! │  └── sell / restock quantities                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory                                                    │
//! │  └── Unique product IDs                                                │
//! │                                                                         │
//! │  Records loaded from disk pass through Layer 2 as well.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::{Money, MAX_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product ID.
///
/// ## Rules
/// - Must not be empty after trimming
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_product_id;
///
/// assert!(validate_product_id("E1").is_ok());
/// assert!(validate_product_id("   ").is_err());
/// ```
pub fn validate_product_id(product_id: &str) -> ValidationResult<()> {
    require_non_empty("product_id", product_id)
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    require_non_empty("name", name)
}

fn require_non_empty(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be strictly positive (free items are not stocked)
/// - Must not exceed [`MAX_PRICE`], the largest price a saved file carries exactly
///
/// ## Example
/// ```rust
/// use stockroom_core::money::Money;
/// use stockroom_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_price(Money::zero()).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if price > MAX_PRICE {
        return Err(ValidationError::Overflow {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an initial stock count.
///
/// ## Rules
/// - Must be zero or greater
pub fn validate_stock(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity_in_stock".to_string(),
        });
    }

    Ok(())
}

/// Validates a sale quantity.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Menu: Sell Product                                                     │
/// │                                                                         │
/// │  Operator enters quantity: 0                                            │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_sale_quantity(0) ← THIS FUNCTION                              │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "Sale quantity must be positive"           │
/// │       │                                                                 │
/// │       └── OK → compare against stock                                    │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_sale_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "Sale quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a restock amount.
///
/// ## Rules
/// - Must be positive (> 0); there is no upper bound
pub fn validate_restock_amount(amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "Restock amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("E1").is_ok());
        assert!(validate_product_id("grocery-001").is_ok());

        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("   ").is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Laptop").is_ok());
        assert_eq!(
            validate_product_name(""),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(1)).is_ok());
        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_cents(-100)).is_err());

        assert!(validate_price(MAX_PRICE).is_ok());
        assert_eq!(
            validate_price(Money::from_cents(MAX_PRICE.cents() + 1)),
            Err(ValidationError::Overflow {
                field: "price".to_string()
            })
        );
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(500).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_quantities() {
        assert!(validate_sale_quantity(1).is_ok());
        assert!(validate_sale_quantity(0).is_err());
        assert!(validate_sale_quantity(-3).is_err());

        assert!(validate_restock_amount(1_000_000).is_ok());
        assert!(validate_restock_amount(0).is_err());

        let err = validate_restock_amount(-1).unwrap_err();
        assert_eq!(err.to_string(), "Restock amount must be positive");
    }
}
