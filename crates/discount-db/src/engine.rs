//! # Resolution Engine
//!
//! Reads the catalog and picks the best discount for a cart.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ResolutionEngine::resolve                          │
//! │                                                                         │
//! │  Cart { items, price }                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  repository.list_all()      ← ONE catalog read   ──► EngineError::Store│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  now = Utc::now()           ← ONE clock snapshot                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  discount_core::select_best ← pure selection     ──► EngineError::Core │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(Some(Resolution)) | Ok(None)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine never writes: resolving the same cart against an unchanged
//! catalog at the same instant always gives the same answer.

use chrono::{DateTime, Utc};
use discount_core::{select_best, Cart, CoreError, Resolution};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::error::DbError;
use crate::repository::discount::DiscountRepository;

/// Failures while resolving a cart.
///
/// "No applicable discount" is not an error; it is `Ok(None)`.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The catalog could not be read.
    #[error("catalog unavailable: {0}")]
    Store(#[from] DbError),

    /// Selection failed (amount overflow).
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Stateless resolver over a discount repository.
#[derive(Debug, Clone)]
pub struct ResolutionEngine {
    repository: DiscountRepository,
}

impl ResolutionEngine {
    /// Creates an engine reading from `repository`.
    pub fn new(repository: DiscountRepository) -> Self {
        ResolutionEngine { repository }
    }

    /// Resolves the best discount for `cart` as of now.
    pub async fn resolve(&self, cart: &Cart) -> Result<Option<Resolution>, EngineError> {
        self.resolve_at(cart, Utc::now()).await
    }

    /// Resolves the best discount for `cart` as of a fixed instant.
    ///
    /// Every validity comparison in one call uses the same `now`.
    #[instrument(skip(self, cart), fields(items = cart.items.len(), price = %cart.price))]
    pub async fn resolve_at(
        &self,
        cart: &Cart,
        now: DateTime<Utc>,
    ) -> Result<Option<Resolution>, EngineError> {
        let discounts = self.repository.list_all().await?;
        let resolution = select_best(&discounts, cart, now)?;

        match &resolution {
            Some(r) => debug!(
                candidates = discounts.len(),
                winner = %r.discount.id,
                discount_value = %r.discount_value,
                "Discount resolved"
            ),
            None => debug!(candidates = discounts.len(), "No applicable discount"),
        }

        Ok(resolution)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
