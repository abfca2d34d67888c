//! # Money Module
//!
//! Provides the `Money` type for prices, sale totals and stock valuations.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  Summing 10,000 stock valuations in f64 drifts by fractions of a cent. │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    price 19.99 → 1999                                                   │
//! │    1999 × 3 = 5997 → "Rs.59.97", exact                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The JSON file stores prices as decimal numbers in major units, so there
//! is exactly one float boundary: [`Money::from_major_units`] on the way in
//! and [`Money::to_major_units`] on the way out. Prices are capped at
//! [`MAX_PRICE`] so every price crosses that boundary unchanged.
//!
//! ## Usage
//! ```rust
//! use stockroom_core::money::Money;
//!
//! let price = Money::from_cents(1999);
//! let total = price * 3;
//! assert_eq!(total.cents(), 5997);
//! assert_eq!(total.to_string(), "Rs.59.97");
//! ```

use std::fmt;
use std::ops::Mul;

/// Currency prefix used by `Display` when none is configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "Rs.";

/// Largest accepted unit price: 2^50 minor units.
///
/// Up to this bound `cents / 100` as f64 and back rounds to the same cents
/// (the conversion error stays below a quarter cent). Above roughly 2^52.6
/// cents neighbouring prices share one f64, so no bound near 2^53 is safe.
pub const MAX_PRICE: Money = Money::from_cents(1 << 50);

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in minor units (hundredths of the currency).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative amounts format correctly; domain rules keep prices positive
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount in major units, rounding to the nearest
    /// minor unit.
    ///
    /// Returns `None` for NaN, infinities, and amounts outside the i64 range.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_units(19.99), Some(Money::from_cents(1999)));
    /// assert_eq!(Money::from_major_units(0.005), Some(Money::from_cents(1)));
    /// assert_eq!(Money::from_major_units(f64::NAN), None);
    /// ```
    pub fn from_major_units(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        let cents = (amount * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
        if cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }

        Some(Money(cents as i64))
    }

    /// Returns the value in major units for serialization.
    #[inline]
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Adds two amounts, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let a = Money::from_cents(150);
    /// assert_eq!(a.checked_add(Money::from_cents(50)), Some(Money::from_cents(200)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_add(a), None);
    /// ```
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Multiplies by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(10000);
    /// assert_eq!(unit_price.checked_mul(2), Some(Money::from_cents(20000)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
    /// ```
    #[inline]
    pub const fn checked_mul(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Formats with an explicit currency prefix.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1234).format_with("$"), "$12.34");
    /// assert_eq!(Money::from_cents(-550).format_with("€"), "-€5.50");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.major().abs(),
            self.minor()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with two decimals and the default currency prefix.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(DEFAULT_CURRENCY_SYMBOL))
    }
}

/// Multiplication by a quantity.
///
/// Callers keep `price × quantity` in range; see `Product`.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
