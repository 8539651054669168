//! # Discount API
//!
//! HTTP server over the discount catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Discount API Server                              │
//! │                                                                         │
//! │  Client ──► axum Router ──► routes::discounts ──► DiscountRepository   │
//! │                  │                   │                                  │
//! │                  │                   └──► ResolutionEngine (apply)      │
//! │                  └──► routes::health ──► store health_check            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`build_router`] is shared by `main.rs` and the integration tests.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;

pub use config::ApiConfig;
pub use error::{ApiError, ErrorCode};
pub use state::AppState;

/// Builds the full router for the discount service.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .merge(routes::discounts::router())
        .with_state(state)
}
