//! # Domain Types
//!
//! Core domain types used throughout the discount service.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │      Discount       │   │      Cart       │   │   Resolution    │   │
//! │  │  ─────────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id (String)        │   │  items (set)    │   │  discount       │   │
//! │  │  valid_until (UTC)  │   │  price (Money)  │   │  discount_value │   │
//! │  │  use_type           │   │                 │   │  final_price    │   │
//! │  │  discount_type      │   │  (transient)    │   │  (transient)    │   │
//! │  │  value (Decimal)    │   └─────────────────┘   └─────────────────┘   │
//! │  │  items (set)        │                                               │
//! │  └─────────────────────┘                                               │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    UseType      │   │  DiscountType   │                             │
//! │  │  SingleUse      │   │  Fixed          │                             │
//! │  │  MultiUse       │   │  Percentage     │                             │
//! │  │  InfinityUse    │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Field names are camelCase (`validUntil`, `useType`, `discountType`); enum
//! variants keep their PascalCase names. `Fix` is accepted as an alias of
//! `Fixed` for older clients.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Use Type
// =============================================================================

/// How often a discount is meant to be redeemed.
///
/// Recorded only; resolution never consults or consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
pub enum UseType {
    /// Intended for a single redemption.
    SingleUse,
    /// Intended for a limited number of redemptions.
    MultiUse,
    /// No redemption limit.
    InfinityUse,
}

// =============================================================================
// Discount Type
// =============================================================================

/// How a discount's `value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
pub enum DiscountType {
    /// `value` is an absolute amount taken off the cart price.
    #[serde(alias = "Fix")]
    Fixed,
    /// `value` is in percentage points of the cart price.
    Percentage,
}

// =============================================================================
// Discount
// =============================================================================

/// A promotional rule in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    /// Unique identifier, stable for the record's lifetime.
    pub id: String,

    /// Last instant (UTC, inclusive) at which the discount applies.
    pub valid_until: DateTime<Utc>,

    /// Redemption policy (metadata only).
    pub use_type: UseType,

    /// Interpretation of `value`.
    pub discount_type: DiscountType,

    /// Fixed amount or percentage points, depending on `discount_type`.
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,

    /// Item identifiers this discount targets.
    #[serde(default)]
    pub items: BTreeSet<String>,
}

impl Discount {
    /// Creates a discount from its parts.
    pub fn new<I, S>(
        id: impl Into<String>,
        valid_until: DateTime<Utc>,
        use_type: UseType,
        discount_type: DiscountType,
        value: Decimal,
        items: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Discount {
            id: id.into(),
            valid_until,
            use_type,
            discount_type,
            value,
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks whether the validity window is still open at `now`.
    ///
    /// The boundary is inclusive: a discount valid until exactly `now` applies.
    #[inline]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_until >= now
    }

    /// Checks whether at least one cart item is targeted by this discount.
    ///
    /// An empty `items` set never overlaps anything.
    #[inline]
    pub fn targets_any(&self, items: &BTreeSet<String>) -> bool {
        !self.items.is_disjoint(items)
    }

    /// Checks full applicability: still valid AND overlapping items.
    pub fn is_applicable(&self, cart: &Cart, now: DateTime<Utc>) -> bool {
        self.is_valid_at(now) && self.targets_any(&cart.items)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A cart to resolve a discount for. Built per request, never persisted.
///
/// ## Invariants
/// - `price` is non-negative (checked by [`Cart::new`])
/// - `items` has set semantics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Item identifiers in the cart.
    pub items: BTreeSet<String>,

    /// Cart subtotal before discount.
    pub price: Money,
}

impl Cart {
    /// Creates a cart, rejecting negative prices.
    ///
    /// ## Example
    /// ```rust
    /// use discount_core::{Cart, Money};
    /// use rust_decimal::Decimal;
    ///
    /// assert!(Cart::new(["a", "b"], Money::new(Decimal::from(20))).is_ok());
    /// assert!(Cart::new(["a"], Money::new(Decimal::from(-1))).is_err());
    /// ```
    pub fn new<I, S>(items: I, price: Money) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if price.is_negative() {
            return Err(CoreError::InvalidCart {
                reason: "price must not be negative".to_string(),
            });
        }

        Ok(Cart {
            items: items.into_iter().map(Into::into).collect(),
            price,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn sample(items: &[&str], valid_until: DateTime<Utc>) -> Discount {
        Discount::new(
            "d-1",
            valid_until,
            UseType::SingleUse,
            DiscountType::Fixed,
            dec!(5),
            items.iter().copied(),
        )
    }

    #[test]
    fn test_validity_boundary_is_inclusive() {
        let now = Utc::now();
        assert!(sample(&["x"], now).is_valid_at(now));
        assert!(sample(&["x"], now + Duration::seconds(1)).is_valid_at(now));
        assert!(!sample(&["x"], now - Duration::seconds(1)).is_valid_at(now));
    }

    #[test]
    fn test_empty_items_never_targeted() {
        let now = Utc::now();
        let discount = sample(&[], now + Duration::days(1));
        let cart = Cart::new(["x", "y"], Money::new(dec!(10))).unwrap();
        assert!(!discount.is_applicable(&cart, now));
    }

    #[test]
    fn test_items_overlap() {
        let now = Utc::now();
        let discount = sample(&["x", "z"], now + Duration::days(1));

        let hit = Cart::new(["a", "z"], Money::new(dec!(10))).unwrap();
        let miss = Cart::new(["a", "b"], Money::new(dec!(10))).unwrap();

        assert!(discount.is_applicable(&hit, now));
        assert!(!discount.is_applicable(&miss, now));
    }

    #[test]
    fn test_duplicate_items_collapse() {
        let discount = sample(&["x", "x", "y"], Utc::now());
        assert_eq!(discount.items.len(), 2);
    }

    #[test]
    fn test_cart_rejects_negative_price() {
        let err = Cart::new(["x"], Money::new(dec!(-0.01))).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCart { .. }));
        assert!(Cart::new(Vec::<String>::new(), Money::zero()).is_ok());
    }

    #[test]
    fn test_discount_wire_format() {
        let json = r#"{
            "id": "7",
            "validUntil": "2030-01-01T00:00:00Z",
            "useType": "InfinityUse",
            "discountType": "Fix",
            "value": 10,
            "items": ["item1", "item2", "item1"]
        }"#;

        let discount: Discount = serde_json::from_str(json).unwrap();
        assert_eq!(discount.id, "7");
        assert_eq!(discount.use_type, UseType::InfinityUse);
        assert_eq!(discount.discount_type, DiscountType::Fixed);
        assert_eq!(discount.value, dec!(10));
        assert_eq!(discount.items.len(), 2);

        let out = serde_json::to_value(&discount).unwrap();
        assert_eq!(out["discountType"], "Fixed");
        assert_eq!(out["value"], 10.0);
        assert_eq!(out["validUntil"], "2030-01-01T00:00:00Z");
    }
}
