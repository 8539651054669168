//! # Application State
//!
//! Shared handles passed to every handler.
//!
//! ## Store Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.backend = memory ──────────────────────► InMemoryDiscountStore  │
//! │                                                                         │
//! │  store.backend = sqlite ──► Database::new ──ok──► SqliteDiscountStore  │
//! │                                   │                                     │
//! │                                  err                                    │
//! │                                   │                                     │
//! │            fallback_to_memory? ── yes ──► warn! + InMemoryDiscountStore │
//! │                                   │                                     │
//! │                                   no ──► startup fails                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use discount_db::{Database, DbConfig, DbError, DiscountRepository, ResolutionEngine};
use tracing::{info, warn};

use crate::config::{StoreBackend, StoreSettings};

/// Handles shared by all requests. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub repository: DiscountRepository,
    pub engine: ResolutionEngine,
    /// Present when the SQLite backend is in use, so it can be closed.
    database: Option<Database>,
}

impl AppState {
    /// Builds state over an existing repository.
    pub fn new(repository: DiscountRepository) -> Self {
        AppState {
            engine: ResolutionEngine::new(repository.clone()),
            repository,
            database: None,
        }
    }

    /// Builds state over a fresh in-memory catalog.
    pub fn in_memory() -> Self {
        Self::new(DiscountRepository::in_memory())
    }

    /// Builds state over an open SQLite database.
    pub fn with_database(database: Database) -> Self {
        AppState {
            database: Some(database.clone()),
            ..Self::new(database.discounts())
        }
    }

    /// Opens the configured store, falling back to memory when allowed.
    pub async fn connect(settings: &StoreSettings) -> Result<Self, DbError> {
        match settings.backend {
            StoreBackend::Memory => {
                info!("Using in-memory discount store");
                Ok(Self::in_memory())
            }
            StoreBackend::Sqlite => {
                let config = DbConfig::new(&settings.database_path)
                    .max_connections(settings.max_connections);

                match Database::new(config).await {
                    Ok(database) => {
                        info!(path = %settings.database_path.display(), "Using SQLite discount store");
                        Ok(Self::with_database(database))
                    }
                    Err(e) if settings.fallback_to_memory => {
                        warn!(
                            error = %e,
                            path = %settings.database_path.display(),
                            "SQLite store unavailable, falling back to in-memory store"
                        );
                        Ok(Self::in_memory())
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }

    /// Name of the active backend.
    pub fn backend(&self) -> &'static str {
        self.repository.backend()
    }

    /// Releases store resources on shutdown.
    pub async fn close(&self) {
        if let Some(database) = &self.database {
            database.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sqlite_settings(path: &str, fallback: bool) -> StoreSettings {
        StoreSettings {
            backend: StoreBackend::Sqlite,
            database_path: PathBuf::from(path),
            max_connections: 1,
            fallback_to_memory: fallback,
        }
    }

    #[tokio::test]
    async fn test_memory_backend() {
        let state = AppState::connect(&StoreSettings::default()).await.unwrap();
        assert_eq!(state.backend(), "memory");
    }

    #[tokio::test]
    async fn test_sqlite_backend() {
        let state = AppState::connect(&sqlite_settings(":memory:", false))
            .await
            .unwrap();
        assert_eq!(state.backend(), "sqlite");
        state.close().await;
    }

    #[tokio::test]
    async fn test_unopenable_sqlite_falls_back() {
        // A path under /dev/null can never be created
        let state = AppState::connect(&sqlite_settings("/dev/null/nope/discounts.db", true))
            .await
            .unwrap();
        assert_eq!(state.backend(), "memory");
    }

    #[tokio::test]
    async fn test_unopenable_sqlite_without_fallback_fails() {
        let result = AppState::connect(&sqlite_settings("/dev/null/nope/discounts.db", false)).await;
        assert!(result.is_err());
    }
}
