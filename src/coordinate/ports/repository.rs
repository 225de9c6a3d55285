//! Repository port for coordinate registry persistence and lookup.

use crate::coordinate::domain::{CoordinateRegistration, TableCoordinate, TableNumber};
use crate::page::Page;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for coordinate repository operations.
pub type CoordinateRepositoryResult<T> = Result<T, CoordinateRepositoryError>;

/// Coordinate registry persistence contract.
#[async_trait]
pub trait CoordinateRepository: Send + Sync {
    /// Stores a new registry entry and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateRepositoryError::DuplicateTableNumber`] when the
    /// table is already registered.
    async fn register(
        &self,
        registration: &CoordinateRegistration,
    ) -> CoordinateRepositoryResult<TableCoordinate>;

    /// Finds the entry for a table.
    ///
    /// Returns `None` when the table is not registered.
    async fn find_by_table_number(
        &self,
        table_number: &TableNumber,
    ) -> CoordinateRepositoryResult<Option<TableCoordinate>>;

    /// Lists entries in registration order.
    async fn list(&self, page: Page) -> CoordinateRepositoryResult<Vec<TableCoordinate>>;
}

/// Errors returned by coordinate repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CoordinateRepositoryError {
    /// The table already has coordinates registered.
    #[error("table '{0}' already has coordinates defined")]
    DuplicateTableNumber(TableNumber),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// The backing store is temporarily unreachable or failed mid-operation.
    #[error("storage unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl CoordinateRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a transient storage failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
