//! # Validation Module
//!
//! Boundary checks applied when a discount is created or updated.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (discount-api)                                │
//! │  └── Type validation (JSON deserialization)                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── id present, bounded, printable, not a route segment               │
//! │  ├── value non-negative, percentage within 0..=100                     │
//! │  └── item identifiers present and bounded                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store                                                        │
//! │  └── PRIMARY KEY uniqueness (DuplicateKey)                             │
//! │                                                                         │
//! │  The resolution algorithm never validates: whatever the store holds    │
//! │  is evaluated as-is.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::{Discount, DiscountType};
use crate::{MAX_IDENTIFIER_LEN, MAX_PERCENTAGE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Ids shadowed by fixed routes under `/api/discount/`.
pub const RESERVED_IDS: &[&str] = &["apply"];

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a discount id.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most `MAX_IDENTIFIER_LEN` characters
/// - No control characters and no `/` (the id is a URL path segment)
/// - Not one of `RESERVED_IDS`
///
/// ## Example
/// ```rust
/// use discount_core::validation::validate_discount_id;
///
/// assert!(validate_discount_id("summer-sale").is_ok());
/// assert!(validate_discount_id("  ").is_err());
/// assert!(validate_discount_id("apply").is_err());
/// ```
pub fn validate_discount_id(id: &str) -> ValidationResult<()> {
    validate_identifier("id", id)?;

    if id.contains('/') {
        return Err(ValidationError::InvalidCharacters {
            field: "id".to_string(),
        });
    }

    if RESERVED_IDS.contains(&id) {
        return Err(ValidationError::Reserved {
            field: "id".to_string(),
            value: id.to_string(),
        });
    }

    Ok(())
}

/// Validates a single item identifier.
pub fn validate_item_id(item: &str) -> ValidationResult<()> {
    validate_identifier("item", item)
}

fn validate_identifier(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_IDENTIFIER_LEN,
        });
    }

    if value.chars().any(char::is_control) {
        return Err(ValidationError::InvalidCharacters {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Value Validators
// =============================================================================

/// Validates a discount value for its kind.
///
/// ## Rules
/// - Never negative
/// - `Percentage` must not exceed 100
///
/// ## Example
/// ```rust
/// use discount_core::validation::validate_value;
/// use discount_core::DiscountType;
/// use rust_decimal::Decimal;
///
/// assert!(validate_value(DiscountType::Fixed, Decimal::from(250)).is_ok());
/// assert!(validate_value(DiscountType::Percentage, Decimal::from(101)).is_err());
/// ```
pub fn validate_value(kind: DiscountType, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: "value".to_string(),
        });
    }

    if kind == DiscountType::Percentage && value > Decimal::from(MAX_PERCENTAGE) {
        return Err(ValidationError::OutOfRange {
            field: "value".to_string(),
            min: 0,
            max: i64::from(MAX_PERCENTAGE),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a full discount record before it reaches the store.
pub fn validate_discount(discount: &Discount) -> ValidationResult<()> {
    validate_discount_id(&discount.id)?;
    validate_value(discount.discount_type, discount.value)?;

    for item in &discount.items {
        validate_item_id(item)?;
    }

    Ok(())
}

/// Validates that the id addressed by an update matches the record's id.
pub fn validate_update_target(path_id: &str, discount: &Discount) -> ValidationResult<()> {
    if path_id != discount.id {
        return Err(ValidationError::IdMismatch {
            path: path_id.to_string(),
            body: discount.id.clone(),
        });
    }

    validate_discount(discount)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UseType;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn discount(id: &str, kind: DiscountType, value: Decimal, items: &[&str]) -> Discount {
        Discount::new(
            id,
            Utc::now(),
            UseType::SingleUse,
            kind,
            value,
            items.iter().copied(),
        )
    }

    #[test]
    fn test_validate_discount_id() {
        assert!(validate_discount_id("7").is_ok());
        assert!(validate_discount_id("550e8400-e29b-41d4-a716-446655440000").is_ok());

        assert!(validate_discount_id("").is_err());
        assert!(validate_discount_id("   ").is_err());
        assert_eq!(
            validate_discount_id(&"a".repeat(101)),
            Err(ValidationError::TooLong {
                field: "id".to_string(),
                max: 100
            })
        );
    }

    #[test]
    fn test_discount_id_must_fit_in_a_path() {
        assert_eq!(
            validate_discount_id("a\u{1}b"),
            Err(ValidationError::InvalidCharacters {
                field: "id".to_string()
            })
        );
        assert!(validate_discount_id("line\nbreak").is_err());
        assert!(validate_discount_id("a/b").is_err());
        assert!(validate_discount_id("tab\t").is_err());
        assert!(validate_discount_id("café-10").is_ok());
    }

    #[test]
    fn test_apply_is_reserved() {
        assert_eq!(
            validate_discount_id("apply"),
            Err(ValidationError::Reserved {
                field: "id".to_string(),
                value: "apply".to_string()
            })
        );
        assert!(validate_discount_id("apply-now").is_ok());
    }

    #[test]
    fn test_item_ids_reject_control_characters() {
        assert!(validate_item_id("sku\u{7f}").is_err());
        assert!(validate_item_id("shoes/red").is_ok());
    }

    #[test]
    fn test_validate_value() {
        assert!(validate_value(DiscountType::Fixed, dec!(0)).is_ok());
        assert!(validate_value(DiscountType::Fixed, dec!(1000)).is_ok());
        assert!(validate_value(DiscountType::Percentage, dec!(100)).is_ok());
        assert!(validate_value(DiscountType::Percentage, dec!(0.5)).is_ok());

        assert!(validate_value(DiscountType::Fixed, dec!(-1)).is_err());
        assert!(validate_value(DiscountType::Percentage, dec!(100.01)).is_err());
    }

    #[test]
    fn test_negative_zero_is_accepted() {
        assert!(validate_value(DiscountType::Fixed, dec!(-0)).is_ok());
    }

    #[test]
    fn test_validate_discount_items() {
        assert!(validate_discount(&discount("a", DiscountType::Fixed, dec!(1), &["x"])).is_ok());
        assert!(validate_discount(&discount("a", DiscountType::Fixed, dec!(1), &[])).is_ok());
        assert!(validate_discount(&discount("a", DiscountType::Fixed, dec!(1), &[" "])).is_err());
    }

    #[test]
    fn test_validate_update_target() {
        let d = discount("7", DiscountType::Percentage, dec!(25), &["item2"]);
        assert!(validate_update_target("7", &d).is_ok());
        assert!(matches!(
            validate_update_target("8", &d),
            Err(ValidationError::IdMismatch { .. })
        ));
    }
}
