//! # In-Memory Store
//!
//! A process-local catalog behind a `RwLock`. Used for tests, development,
//! and as the fallback backend when SQLite cannot be opened.
//!
//! Records keep insertion order; `update` replaces in place.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use discount_core::Discount;
use tracing::debug;

use super::{DiscountStore, ENTITY};
use crate::error::{DbError, DbResult};

/// In-memory [`DiscountStore`].
#[derive(Debug, Default)]
pub struct InMemoryDiscountStore {
    discounts: RwLock<Vec<Discount>>,
}

impl InMemoryDiscountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `discounts`, in order.
    ///
    /// Later duplicates of an id are dropped.
    pub fn with_discounts(discounts: impl IntoIterator<Item = Discount>) -> Self {
        let mut seen: Vec<Discount> = Vec::new();
        for discount in discounts {
            if !seen.iter().any(|d| d.id == discount.id) {
                seen.push(discount);
            }
        }
        InMemoryDiscountStore {
            discounts: RwLock::new(seen),
        }
    }
}

fn poisoned<T>(_: PoisonError<T>) -> DbError {
    DbError::Internal("discount store lock poisoned".to_string())
}

#[async_trait]
impl DiscountStore for InMemoryDiscountStore {
    async fn get(&self, id: &str) -> DbResult<Option<Discount>> {
        let discounts = self.discounts.read().map_err(poisoned)?;
        Ok(discounts.iter().find(|d| d.id == id).cloned())
    }

    async fn list(&self) -> DbResult<Vec<Discount>> {
        let discounts = self.discounts.read().map_err(poisoned)?;
        Ok(discounts.clone())
    }

    async fn insert(&self, discount: &Discount) -> DbResult<()> {
        let mut discounts = self.discounts.write().map_err(poisoned)?;

        if discounts.iter().any(|d| d.id == discount.id) {
            return Err(DbError::duplicate(ENTITY, &discount.id));
        }

        discounts.push(discount.clone());
        debug!(id = %discount.id, "Discount inserted (memory)");
        Ok(())
    }

    async fn update(&self, discount: &Discount) -> DbResult<()> {
        let mut discounts = self.discounts.write().map_err(poisoned)?;

        let slot = discounts
            .iter_mut()
            .find(|d| d.id == discount.id)
            .ok_or_else(|| DbError::not_found(ENTITY, &discount.id))?;

        *slot = discount.clone();
        debug!(id = %discount.id, "Discount updated (memory)");
        Ok(())
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        let mut discounts = self.discounts.write().map_err(poisoned)?;
        let before = discounts.len();
        discounts.retain(|d| d.id != id);
        debug!(id = %id, removed = before - discounts.len(), "Discount deleted (memory)");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.discounts.read().is_ok()
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
