//! # discount-core: Pure Business Logic for the Discount Service
//!
//! This crate is the **heart** of the discount service. It holds the catalog
//! data model and the best-discount selection rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Discount Service Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/discount-api (axum)                        │   │
//! │  │   POST /api/discount ─ PUT ─ DELETE ─ POST /api/discount/apply  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               discount-db (Repository + Engine)                 │   │
//! │  │     DiscountRepository ──► DiscountStore (SQLite / memory)      │   │
//! │  │     ResolutionEngine   ──► list_all() + now ──┐                 │   │
//! │  └───────────────────────────────────────────────┼─────────────────┘   │
//! │                                                  │                      │
//! │  ┌───────────────────────────────────────────────▼─────────────────┐   │
//! │  │             ★ discount-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐ │   │
//! │  │   │   types   │  │   money   │  │ resolution │  │ validation│ │   │
//! │  │   │ Discount  │  │   Money   │  │ select_best│  │   rules   │ │   │
//! │  │   │   Cart    │  │ percent_of│  │ Resolution │  │  checks   │ │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Discount, Cart, UseType, DiscountType)
//! - [`money`] - Money type over exact decimals
//! - [`resolution`] - Applicability filter and best-discount selection
//! - [`error`] - Domain error types
//! - [`validation`] - Create/update boundary checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: the caller passes `now`; same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Exact Money**: decimals, never floats
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use discount_core::{select_best, Cart, Discount, DiscountType, Money, UseType};
//! use rust_decimal::Decimal;
//!
//! let now = Utc::now();
//! let half_off = Discount::new(
//!     "half-off",
//!     now + Duration::days(1),
//!     UseType::MultiUse,
//!     DiscountType::Percentage,
//!     Decimal::from(50),
//!     ["shoes"],
//! );
//!
//! let cart = Cart::new(["shoes"], Money::new(Decimal::from(100))).unwrap();
//! let best = select_best(&[half_off], &cart, now).unwrap().unwrap();
//!
//! assert_eq!(best.discount_value, Money::new(Decimal::from(50)));
//! assert_eq!(best.final_price, Money::new(Decimal::from(50)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod resolution;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use resolution::{realized_value, select_best, Resolution};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a discount id or an item identifier.
pub const MAX_IDENTIFIER_LEN: usize = 100;

/// Upper bound for a `Percentage` discount value, in percentage points.
pub const MAX_PERCENTAGE: u32 = 100;
