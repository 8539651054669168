//! # Discount Repository
//!
//! Catalog operations used by the API and the resolution engine.
//!
//! The repository adds no business rules of its own: validation happens
//! before a record reaches it, and the store decides existence.

use std::sync::Arc;

use discount_core::Discount;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use crate::store::{DiscountStore, InMemoryDiscountStore};

/// Repository for discount catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.discounts();            // SQLite
/// let repo = DiscountRepository::in_memory();
///
/// repo.insert(&discount).await?;
/// let all = repo.list_all().await?;
/// ```
#[derive(Clone)]
pub struct DiscountRepository {
    store: Arc<dyn DiscountStore>,
}

impl std::fmt::Debug for DiscountRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscountRepository")
            .field("backend", &self.store.backend())
            .finish()
    }
}

impl DiscountRepository {
    /// Creates a repository over an injected store.
    pub fn new(store: Arc<dyn DiscountStore>) -> Self {
        DiscountRepository { store }
    }

    /// Creates a repository over a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryDiscountStore::new()))
    }

    /// Name of the backing store (`"sqlite"` or `"memory"`).
    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Gets a discount by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Discount))` - Discount found
    /// * `Ok(None)` - No discount with this id
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Discount>> {
        self.store.get(id).await
    }

    /// Inserts a new discount.
    ///
    /// ## Errors
    /// * `DbError::DuplicateKey` - a discount with this id already exists
    pub async fn insert(&self, discount: &Discount) -> DbResult<()> {
        self.store.insert(discount).await?;
        debug!(id = %discount.id, backend = self.backend(), "Discount created");
        Ok(())
    }

    /// Replaces an existing discount (matched by id).
    ///
    /// ## Errors
    /// * `DbError::NotFound` - no discount with this id
    pub async fn update(&self, discount: &Discount) -> DbResult<()> {
        self.store.update(discount).await?;
        debug!(id = %discount.id, backend = self.backend(), "Discount replaced");
        Ok(())
    }

    /// Deletes a discount. Absent ids are not an error.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        self.store.delete(id).await
    }

    /// Returns the entire catalog in store order.
    pub async fn list_all(&self) -> DbResult<Vec<Discount>> {
        self.store.list().await
    }

    /// Whether the backing store is responsive.
    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }
}

/// Generates a new discount id (UUID v4).
pub fn generate_discount_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use crate::store::MockDiscountStore;
    use chrono::{Duration, Utc};
    use discount_core::{DiscountType, UseType};
    use rust_decimal_macros::dec;

    fn sample(id: &str) -> Discount {
        Discount::new(
            id,
            Utc::now() + Duration::days(30),
            UseType::SingleUse,
            DiscountType::Percentage,
            dec!(25),
            ["item2"],
        )
    }

    async fn crud_round_trip(repo: DiscountRepository) {
        // Create, then read it back
        let created = sample("7");
        repo.insert(&created).await.unwrap();
        assert_eq!(repo.get_by_id("7").await.unwrap(), Some(created.clone()));

        // Update replaces the whole record
        let mut changed = created.clone();
        changed.value = dec!(40);
        changed.items = ["item9".to_string()].into_iter().collect();
        repo.update(&changed).await.unwrap();
        assert_eq!(repo.get_by_id("7").await.unwrap(), Some(changed));

        // Delete, then it is gone
        repo.delete("7").await.unwrap();
        assert_eq!(repo.get_by_id("7").await.unwrap(), None);
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_crud_round_trip_in_memory() {
        crud_round_trip(DiscountRepository::in_memory()).await;
    }

    #[tokio::test]
    async fn test_crud_round_trip_sqlite() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        crud_round_trip(db.discounts()).await;
    }

    #[tokio::test]
    async fn test_store_errors_pass_through() {
        let mut store = MockDiscountStore::new();
        store
            .expect_insert()
            .returning(|d| Err(DbError::duplicate("Discount", d.id.clone())));
        store.expect_backend().return_const("mock");

        let repo = DiscountRepository::new(Arc::new(store));
        let err = repo.insert(&sample("x")).await.unwrap_err();
        assert!(matches!(err, DbError::DuplicateKey { id, .. } if id == "x"));
    }

    #[test]
    fn test_generate_discount_id() {
        let a = generate_discount_id();
        let b = generate_discount_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
