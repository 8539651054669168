//! # Database Error Types
//!
//! Error types for store operations, shared by the SQLite and in-memory
//! backends so callers never see which one produced a failure.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error / serde_json::Error / lock poisoning                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Categorized, backend-neutral                  │
//! │       │                                                                 │
//! │       ├──► EngineError::Store (resolution path)                        │
//! │       ▼                                                                 │
//! │  ApiError (discount-api) ← {code, message} JSON body + status          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// No record with the given id.
    ///
    /// ## When This Occurs
    /// - `update` of an id that does not exist
    /// - Decoding a row that vanished between queries
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A record with the same id already exists.
    ///
    /// ## When This Occurs
    /// - `insert` of an id already in the catalog
    /// - Any PRIMARY KEY / UNIQUE violation in SQLite
    #[error("{entity} already exists: {id}")]
    DuplicateKey { entity: String, id: String },

    /// The catalog could not be opened or the pool is gone.
    ///
    /// ## When This Occurs
    /// - Database file or its directory can't be created
    /// - Pool already closed (shutdown)
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Embedded schema could not be applied.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected a statement.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored row could not be turned back into a `Discount`.
    ///
    /// ## When This Occurs
    /// - `items` column is not a JSON array of strings
    /// - `value` column is not a decimal
    #[error("Corrupt {column} in row {id}: {reason}")]
    Decode {
        id: String,
        column: String,
        reason: String,
    },

    /// No connection freed up within the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Anything else (lock poisoning, encoding failures, driver errors).
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl DbError {
    /// `NotFound` for `entity` / `id`.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// `DuplicateKey` for `entity` / `id`.
    pub fn duplicate(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::DuplicateKey {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// `Decode` for a corrupt `column` of row `id`.
    pub fn decode(
        id: impl Into<String>,
        column: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        DbError::Decode {
            id: id.into(),
            column: column.into(),
            reason: reason.to_string(),
        }
    }
}

/// Classifies sqlx failures.
///
/// ```text
/// RowNotFound                    → NotFound
/// Database("UNIQUE constraint")  → DuplicateKey (id filled in by the caller)
/// Database(other)                → QueryFailed
/// PoolTimedOut                   → PoolExhausted
/// PoolClosed                     → ConnectionFailed
/// anything else                  → Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),
            sqlx::Error::Database(db_err) if is_unique_violation(db_err.message()) => {
                let column = db_err
                    .message()
                    .rsplit(": ")
                    .next()
                    .unwrap_or("unknown")
                    .to_string();
                DbError::duplicate(column, "unknown")
            }
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

// "UNIQUE constraint failed: discounts.id"
fn is_unique_violation(message: &str) -> bool {
    message.starts_with("UNIQUE constraint failed")
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result alias for store operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::NotFound { .. }
        ));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            DbError::duplicate("Discount", "7").to_string(),
            "Discount already exists: 7"
        );
        assert_eq!(
            DbError::decode("7", "items", "expected array").to_string(),
            "Corrupt items in row 7: expected array"
        );
    }
}
