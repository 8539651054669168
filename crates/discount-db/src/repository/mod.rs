//! # Repository Module
//!
//! Repository implementations over the catalog store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler / ResolutionEngine / seed                                │
//! │       │                                                                 │
//! │       │  repo.list_all()                                               │
//! │       ▼                                                                 │
//! │  DiscountRepository                                                    │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, discount)                                           │
//! │  ├── update(&self, discount)                                           │
//! │  ├── delete(&self, id)                                                 │
//! │  └── list_all(&self)                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<dyn DiscountStore>  (SQLite or in-memory, injected)               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`DiscountRepository`](discount::DiscountRepository) - Discount catalog CRUD

pub mod discount;
