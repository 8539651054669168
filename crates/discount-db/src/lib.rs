//! # discount-db: Storage Layer for the Discount Service
//!
//! Catalog storage (SQLite via sqlx, or in-memory), the repository over it,
//! and the resolution engine that reads it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Discount Service Data Flow                          │
//! │                                                                         │
//! │  HTTP handler (discount-api)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  discount-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────────┐   ┌────────────────────┐                │   │
//! │  │   │ ResolutionEngine │──►│ DiscountRepository │                │   │
//! │  │   │   (engine.rs)    │   │  (repository/)     │                │   │
//! │  │   └──────────────────┘   └─────────┬──────────┘                │   │
//! │  │                                    │ Arc<dyn DiscountStore>    │   │
//! │  │                     ┌──────────────┴──────────────┐            │   │
//! │  │                     ▼                             ▼            │   │
//! │  │          ┌────────────────────┐      ┌─────────────────────┐   │   │
//! │  │          │SqliteDiscountStore │      │InMemoryDiscountStore│   │   │
//! │  │          │ Database (pool.rs) │      │  RwLock<Vec<_>>     │   │   │
//! │  │          │ migrations (embed) │      └─────────────────────┘   │   │
//! │  │          └────────────────────┘                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`store`] - The `DiscountStore` trait and its backends
//! - [`repository`] - `DiscountRepository`
//! - [`engine`] - `ResolutionEngine`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use discount_db::{Database, DbConfig, ResolutionEngine};
//!
//! let db = Database::new(DbConfig::new("./data/discounts.db")).await?;
//! let engine = ResolutionEngine::new(db.discounts());
//!
//! if let Some(resolution) = engine.resolve(&cart).await? {
//!     println!("{} off", resolution.discount_value);
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use engine::{EngineError, ResolutionEngine};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::discount::{generate_discount_id, DiscountRepository};
pub use store::{DiscountStore, InMemoryDiscountStore, SqliteDiscountStore};
