//! HTTP routes.
//!
//! ```text
//! GET    /health
//! POST   /api/discount
//! GET    /api/discount
//! GET    /api/discount/{id}
//! PUT    /api/discount/{id}
//! DELETE /api/discount/{id}
//! POST   /api/discount/apply
//! ```

pub mod discounts;
pub mod health;
