//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A 15% discount on 19.99 must be exactly 2.9985, so that the caller    │
//! │  decides how (and whether) to round it.                                │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    96-bit mantissa + scale, base-10 exact                               │
//! │    Checked arithmetic: overflow is an error, never a panic              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use discount_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::new(Decimal::new(1999, 2)); // 19.99
//! let off = price.percent_of(Decimal::from(10)).unwrap();
//! assert_eq!(off.amount(), Decimal::new(1999, 3)); // 1.999
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// A single-currency monetary amount.
///
/// ## Design Decisions
/// - **Signed**: a discount larger than the cart price yields a negative
///   final price, and that must be representable
/// - **JSON numbers**: written as a number, read from a number or a string
/// - **No panicking operators**: only `checked_*` arithmetic is exposed
///
/// ## Where Money is Used
/// ```text
/// Cart.price ──► select_best ──► Resolution.discount_value
///                     │
///                     └────────► Resolution.final_price = price − value
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Money {
    /// Creates a Money value from a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Computes `self * pct / 100`.
    ///
    /// ## Arguments
    /// * `pct` - Percentage points (50 = 50%). Values outside 0..=100 are
    ///   computed as-is; bounds belong to the create/update boundary.
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let subtotal = Money::new(Decimal::from(100));
    /// let off = subtotal.percent_of(Decimal::from(50)).unwrap();
    /// assert_eq!(off, Money::new(Decimal::from(50)));
    /// ```
    pub fn percent_of(&self, pct: Decimal) -> CoreResult<Money> {
        // Multiplying first keeps every digit; near Decimal::MAX only
        // dividing first fits
        self.0
            .checked_mul(pct)
            .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
            .or_else(|| {
                self.0
                    .checked_div(Decimal::ONE_HUNDRED)
                    .and_then(|hundredth| hundredth.checked_mul(pct))
            })
            .map(Money)
            .ok_or_else(|| CoreError::overflow("percentage of amount"))
    }

    /// Subtracts `other` from `self`, failing on overflow.
    ///
    /// The result may be negative.
    pub fn checked_sub(&self, other: Money) -> CoreResult<Money> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or_else(|| CoreError::overflow("subtraction"))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount with its stored scale (no currency symbol).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
