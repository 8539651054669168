//! # Resolution Module
//!
//! Picks the single best applicable discount for a cart.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Best-Discount Selection                              │
//! │                                                                         │
//! │  catalog (in catalog order)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  filter: valid_until >= now  AND  items ∩ cart.items ≠ ∅               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  realized value:  Fixed      → value                                   │
//! │                   Percentage → price × value / 100                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  best = none, best_value = 0                                           │
//! │  for each: if value > best_value  → replace   (strictly greater)       │
//! │            if value == best_value → keep the earlier one               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Some(Resolution { discount, value, price − value }) or None           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A discount whose realized value is exactly zero (or negative) never wins,
//! even when it is the only applicable one. The final price is not clamped:
//! a fixed discount larger than the cart yields a negative final price.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{Cart, Discount, DiscountType};

// =============================================================================
// Resolution
// =============================================================================

/// The winning discount for a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// The selected catalog entry.
    pub discount: Discount,

    /// Amount this discount takes off the cart price.
    pub discount_value: Money,

    /// `price − discount_value`; may be negative.
    pub final_price: Money,
}

// =============================================================================
// Selection
// =============================================================================

/// Computes the concrete amount `discount` yields for a cart priced `price`.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use discount_core::{realized_value, Discount, DiscountType, Money, UseType};
/// use rust_decimal::Decimal;
///
/// let pct = Discount::new("p", Utc::now(), UseType::MultiUse,
///     DiscountType::Percentage, Decimal::from(50), ["x"]);
/// let value = realized_value(&pct, Money::new(Decimal::from(10))).unwrap();
/// assert_eq!(value, Money::new(Decimal::from(5)));
/// ```
pub fn realized_value(discount: &Discount, price: Money) -> CoreResult<Money> {
    match discount.discount_type {
        DiscountType::Fixed => Ok(Money::new(discount.value)),
        DiscountType::Percentage => price.percent_of(discount.value),
    }
}

/// Selects the best applicable discount for `cart` as of `now`.
///
/// ## Arguments
/// * `discounts` - The full catalog, in catalog order (order decides ties)
/// * `cart` - Items and subtotal to evaluate
/// * `now` - One timestamp snapshot used for every validity comparison
///
/// ## Returns
/// * `Ok(Some(Resolution))` - A discount with positive realized value won
/// * `Ok(None)` - Nothing applicable, or nothing worth more than zero
/// * `Err(CoreError::AmountOverflow)` - Decimal arithmetic overflowed
pub fn select_best(
    discounts: &[Discount],
    cart: &Cart,
    now: DateTime<Utc>,
) -> CoreResult<Option<Resolution>> {
    let mut best: Option<&Discount> = None;
    let mut best_value = Money::zero();

    for discount in discounts.iter().filter(|d| d.is_applicable(cart, now)) {
        let value = realized_value(discount, cart.price)?;
        if value > best_value {
            best_value = value;
            best = Some(discount);
        }
    }

    let Some(winner) = best else {
        return Ok(None);
    };

    Ok(Some(Resolution {
        discount: winner.clone(),
        discount_value: best_value,
        final_price: cart.price.checked_sub(best_value)?,
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UseType;
    use chrono::Duration;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn discount(
        id: &str,
        kind: DiscountType,
        value: Decimal,
        items: &[&str],
        valid_until: DateTime<Utc>,
    ) -> Discount {
        Discount::new(
            id,
            valid_until,
            UseType::MultiUse,
            kind,
            value,
            items.iter().copied(),
        )
    }

    fn cart(items: &[&str], price: Decimal) -> Cart {
        Cart::new(items.iter().copied(), Money::new(price)).unwrap()
    }

    #[test]
    fn test_percentage_beats_fixed_on_large_cart() {
        let now = Utc::now();
        let future = now + Duration::days(1);
        let catalog = vec![
            discount("A", DiscountType::Fixed, dec!(10), &["x"], future),
            discount("B", DiscountType::Percentage, dec!(50), &["x"], future),
        ];

        let best = select_best(&catalog, &cart(&["x"], dec!(100)), now)
            .unwrap()
            .unwrap();

        assert_eq!(best.discount.id, "B");
        assert_eq!(best.discount_value, Money::new(dec!(50)));
        assert_eq!(best.final_price, Money::new(dec!(50)));
    }

    #[test]
    fn test_fixed_beats_percentage_on_small_cart() {
        let now = Utc::now();
        let future = now + Duration::days(1);
        let catalog = vec![
            discount("A", DiscountType::Fixed, dec!(10), &["x"], future),
            discount("B", DiscountType::Percentage, dec!(50), &["x"], future),
        ];

        let best = select_best(&catalog, &cart(&["x"], dec!(10)), now)
            .unwrap()
            .unwrap();

        assert_eq!(best.discount.id, "A");
        assert_eq!(best.discount_value, Money::new(dec!(10)));
        assert_eq!(best.final_price, Money::zero());
    }

    #[test]
    fn test_expired_discount_is_excluded() {
        let now = Utc::now();
        let catalog = vec![discount(
            "C",
            DiscountType::Fixed,
            dec!(5),
            &["y"],
            now - Duration::days(1),
        )];

        let best = select_best(&catalog, &cart(&["y"], dec!(50)), now).unwrap();
        assert!(best.is_none());
    }

    #[test]
    fn test_expired_discount_loses_even_when_bigger() {
        let now = Utc::now();
        let catalog = vec![
            discount("old", DiscountType::Fixed, dec!(90), &["y"], now - Duration::seconds(1)),
            discount("new", DiscountType::Fixed, dec!(1), &["y"], now + Duration::days(1)),
        ];

        let best = select_best(&catalog, &cart(&["y"], dec!(100)), now)
            .unwrap()
            .unwrap();
        assert_eq!(best.discount.id, "new");
    }

    #[test]
    fn test_valid_until_now_still_applies() {
        let now = Utc::now();
        let catalog = vec![discount("edge", DiscountType::Fixed, dec!(3), &["y"], now)];

        let best = select_best(&catalog, &cart(&["y"], dec!(10)), now).unwrap();
        assert!(best.is_some());
    }

    #[test]
    fn test_zero_value_never_wins() {
        let now = Utc::now();
        let catalog = vec![discount(
            "D",
            DiscountType::Fixed,
            dec!(0),
            &["z"],
            now + Duration::days(1),
        )];

        let best = select_best(&catalog, &cart(&["z"], dec!(20)), now).unwrap();
        assert!(best.is_none());
    }

    #[test]
    fn test_percentage_of_free_cart_never_wins() {
        let now = Utc::now();
        let catalog = vec![discount(
            "P",
            DiscountType::Percentage,
            dec!(50),
            &["z"],
            now + Duration::days(1),
        )];

        let best = select_best(&catalog, &cart(&["z"], dec!(0)), now).unwrap();
        assert!(best.is_none());
    }

    #[test]
    fn test_disjoint_items_are_excluded() {
        let now = Utc::now();
        let future = now + Duration::days(1);
        let catalog = vec![
            discount("other", DiscountType::Fixed, dec!(50), &["b"], future),
            discount("empty", DiscountType::Fixed, dec!(50), &[], future),
        ];

        let best = select_best(&catalog, &cart(&["a"], dec!(100)), now).unwrap();
        assert!(best.is_none());
    }

    #[test]
    fn test_first_seen_wins_ties() {
        let now = Utc::now();
        let future = now + Duration::days(1);
        // 10 fixed and 10% of 100 are equal
        let catalog = vec![
            discount("first", DiscountType::Fixed, dec!(10), &["x"], future),
            discount("second", DiscountType::Percentage, dec!(10), &["x"], future),
            discount("third", DiscountType::Fixed, dec!(10.00), &["x"], future),
        ];

        let best = select_best(&catalog, &cart(&["x"], dec!(100)), now)
            .unwrap()
            .unwrap();
        assert_eq!(best.discount.id, "first");
    }

    #[test]
    fn test_later_strictly_greater_replaces_earlier() {
        let now = Utc::now();
        let future = now + Duration::days(1);
        let catalog = vec![
            discount("small", DiscountType::Fixed, dec!(1), &["x"], future),
            discount("tie", DiscountType::Fixed, dec!(1), &["x"], future),
            discount("big", DiscountType::Fixed, dec!(1.01), &["x"], future),
        ];

        let best = select_best(&catalog, &cart(&["x"], dec!(100)), now)
            .unwrap()
            .unwrap();
        assert_eq!(best.discount.id, "big");
    }

    #[test]
    fn test_winner_is_at_least_every_applicable() {
        let now = Utc::now();
        let future = now + Duration::days(1);
        let catalog = vec![
            discount("a", DiscountType::Fixed, dec!(7), &["x"], future),
            discount("b", DiscountType::Percentage, dec!(12.5), &["x", "y"], future),
            discount("c", DiscountType::Fixed, dec!(9.99), &["y"], future),
            discount("d", DiscountType::Percentage, dec!(3), &["y"], future),
        ];
        let cart = cart(&["x", "y"], dec!(80));

        let best = select_best(&catalog, &cart, now).unwrap().unwrap();
        for d in catalog.iter().filter(|d| d.is_applicable(&cart, now)) {
            assert!(best.discount_value >= realized_value(d, cart.price).unwrap());
        }
        assert_eq!(best.discount.id, "b");
        assert_eq!(best.discount_value, Money::new(dec!(10)));
    }

    #[test]
    fn test_negative_final_price_is_not_clamped() {
        let now = Utc::now();
        let catalog = vec![discount(
            "big",
            DiscountType::Fixed,
            dec!(25),
            &["x"],
            now + Duration::days(1),
        )];

        let best = select_best(&catalog, &cart(&["x"], dec!(10)), now)
            .unwrap()
            .unwrap();
        assert_eq!(best.final_price, Money::new(dec!(-15)));
    }

    #[test]
    fn test_out_of_range_percentage_is_computed_as_is() {
        let now = Utc::now();
        let catalog = vec![discount(
            "over",
            DiscountType::Percentage,
            dec!(150),
            &["x"],
            now + Duration::days(1),
        )];

        let best = select_best(&catalog, &cart(&["x"], dec!(40)), now)
            .unwrap()
            .unwrap();
        assert_eq!(best.discount_value, Money::new(dec!(60)));
        assert_eq!(best.final_price, Money::new(dec!(-20)));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let now = Utc::now();
        let future = now + Duration::days(1);
        let catalog = vec![
            discount("a", DiscountType::Fixed, dec!(4), &["x"], future),
            discount("b", DiscountType::Percentage, dec!(5), &["x"], future),
        ];
        let cart = cart(&["x"], dec!(80));

        let first = select_best(&catalog, &cart, now).unwrap();
        let second = select_best(&catalog, &cart, now).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_catalog() {
        let best = select_best(&[], &cart(&["x"], dec!(10)), Utc::now()).unwrap();
        assert!(best.is_none());
    }

    #[test]
    fn test_resolution_wire_format() {
        let now = Utc::now();
        let catalog = vec![discount(
            "w",
            DiscountType::Fixed,
            dec!(2),
            &["x"],
            now + Duration::days(1),
        )];
        let best = select_best(&catalog, &cart(&["x"], dec!(5)), now)
            .unwrap()
            .unwrap();

        let json = serde_json::to_value(&best).unwrap();
        assert_eq!(json["discount"]["id"], "w");
        assert_eq!(json["discountValue"], 2.0);
        assert_eq!(json["finalPrice"], 3.0);
    }
}
