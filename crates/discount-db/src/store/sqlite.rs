//! # SQLite Store
//!
//! The durable catalog backend.
//!
//! ## Row Mapping
//! ```text
//! ┌──────────────────────┬───────────────────────────────────────────────┐
//! │  Discount field      │  discounts column                             │
//! ├──────────────────────┼───────────────────────────────────────────────┤
//! │  id                  │  id TEXT PRIMARY KEY                          │
//! │  valid_until         │  valid_until TEXT (RFC 3339, UTC)             │
//! │  use_type            │  use_type TEXT ('single_use', ...)            │
//! │  discount_type       │  discount_type TEXT ('fixed', 'percentage')   │
//! │  value               │  value TEXT (exact decimal)                   │
//! │  items               │  items TEXT (JSON array)                      │
//! └──────────────────────┴───────────────────────────────────────────────┘
//! ```
//!
//! `list` orders by `rowid`, which preserves insertion order across updates.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use discount_core::{Discount, DiscountType, UseType};
use rust_decimal::Decimal;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use super::{DiscountStore, ENTITY};
use crate::error::{DbError, DbResult};

/// One row of the `discounts` table, before decoding `value` and `items`.
#[derive(Debug, FromRow)]
struct DiscountRow {
    id: String,
    valid_until: DateTime<Utc>,
    use_type: UseType,
    discount_type: DiscountType,
    value: String,
    items: String,
}

impl TryFrom<DiscountRow> for Discount {
    type Error = DbError;

    fn try_from(row: DiscountRow) -> Result<Self, Self::Error> {
        let value = Decimal::from_str(&row.value)
            .map_err(|e| DbError::decode(&row.id, "value", e))?;
        let items: Vec<String> =
            serde_json::from_str(&row.items).map_err(|e| DbError::decode(&row.id, "items", e))?;

        Ok(Discount::new(
            row.id,
            row.valid_until,
            row.use_type,
            row.discount_type,
            value,
            items,
        ))
    }
}

fn encode_items(discount: &Discount) -> DbResult<String> {
    serde_json::to_string(&discount.items)
        .map_err(|e| DbError::Internal(format!("cannot encode items of {}: {e}", discount.id)))
}

/// SQLite-backed [`DiscountStore`].
#[derive(Debug, Clone)]
pub struct SqliteDiscountStore {
    pool: SqlitePool,
}

impl SqliteDiscountStore {
    /// Creates a store over an already-migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteDiscountStore { pool }
    }
}

#[async_trait]
impl DiscountStore for SqliteDiscountStore {
    async fn get(&self, id: &str) -> DbResult<Option<Discount>> {
        debug!(id = %id, "Fetching discount");

        let row = sqlx::query_as::<_, DiscountRow>(
            r#"
            SELECT id, valid_until, use_type, discount_type, value, items
            FROM discounts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Discount::try_from).transpose()
    }

    async fn list(&self) -> DbResult<Vec<Discount>> {
        let rows = sqlx::query_as::<_, DiscountRow>(
            r#"
            SELECT id, valid_until, use_type, discount_type, value, items
            FROM discounts
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed discounts");
        rows.into_iter().map(Discount::try_from).collect()
    }

    async fn insert(&self, discount: &Discount) -> DbResult<()> {
        debug!(id = %discount.id, "Inserting discount");

        let items = encode_items(discount)?;

        sqlx::query(
            r#"
            INSERT INTO discounts (id, valid_until, use_type, discount_type, value, items)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&discount.id)
        .bind(discount.valid_until)
        .bind(discount.use_type)
        .bind(discount.discount_type)
        .bind(discount.value.to_string())
        .bind(items)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::DuplicateKey { .. } => DbError::duplicate(ENTITY, &discount.id),
            other => other,
        })?;

        Ok(())
    }

    async fn update(&self, discount: &Discount) -> DbResult<()> {
        debug!(id = %discount.id, "Updating discount");

        let items = encode_items(discount)?;

        let result = sqlx::query(
            r#"
            UPDATE discounts SET
                valid_until = ?2,
                use_type = ?3,
                discount_type = ?4,
                value = ?5,
                items = ?6,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
            WHERE id = ?1
            "#,
        )
        .bind(&discount.id)
        .bind(discount.valid_until)
        .bind(discount.use_type)
        .bind(discount.discount_type)
        .bind(discount.value.to_string())
        .bind(items)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ENTITY, &discount.id));
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM discounts WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id = %id, removed = result.rows_affected(), "Deleted discount");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
