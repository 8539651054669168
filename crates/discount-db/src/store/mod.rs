//! # Catalog Store
//!
//! The persistence contract for discounts, and its two backends.
//!
//! ## Store Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      DiscountStore                                      │
//! │                                                                         │
//! │  get(id)        → Some(discount) | None                                │
//! │  list()         → every record, insertion order                        │
//! │  insert(d)      → Ok | DuplicateKey                                    │
//! │  update(d)      → Ok | NotFound       (full replace, keeps position)   │
//! │  delete(id)     → Ok                  (absent id is not an error)      │
//! │  health_check() → bool                                                 │
//! │                                                                         │
//! │         ┌──────────────────────┐     ┌──────────────────────┐          │
//! │         │ InMemoryDiscountStore│     │ SqliteDiscountStore  │          │
//! │         │  RwLock<Vec<_>>      │     │  SqlitePool (WAL)    │          │
//! │         └──────────────────────┘     └──────────────────────┘          │
//! │                                                                         │
//! │  Each call is atomic on its own. There are no cross-call               │
//! │  transactions; concurrent writers are last-writer-wins.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use discount_core::Discount;

use crate::error::DbResult;

pub use memory::InMemoryDiscountStore;
pub use sqlite::SqliteDiscountStore;

/// Entity name used in store errors.
pub(crate) const ENTITY: &str = "Discount";

/// Persistence contract for the discount catalog.
///
/// Writes are visible to every later read as soon as the call returns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiscountStore: Send + Sync {
    /// Fetches one discount by id.
    async fn get(&self, id: &str) -> DbResult<Option<Discount>>;

    /// Returns the whole catalog in a stable order.
    async fn list(&self) -> DbResult<Vec<Discount>>;

    /// Adds a new discount. Fails with `DuplicateKey` if the id exists.
    async fn insert(&self, discount: &Discount) -> DbResult<()>;

    /// Replaces the discount with the same id. Fails with `NotFound` if absent.
    async fn update(&self, discount: &Discount) -> DbResult<()>;

    /// Removes a discount. Removing an absent id succeeds.
    async fn delete(&self, id: &str) -> DbResult<()>;

    /// Whether the backend can currently serve requests.
    async fn health_check(&self) -> bool;

    /// Short backend name for health output and logs.
    fn backend(&self) -> &'static str;
}
