//! Service layer for registering and resolving table coordinates.

use crate::coordinate::{
    domain::{
        CoordinateDomainError, CoordinateRegistration, GoalPose, TableCoordinate, TableNumber,
    },
    ports::{CoordinateRepository, CoordinateRepositoryError},
};
use crate::page::Page;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for registering a table's goal pose.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterCoordinateRequest {
    table_number: String,
    goal_x: f64,
    goal_y: f64,
    goal_yaw: f64,
}

impl RegisterCoordinateRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(table_number: impl Into<String>, goal_x: f64, goal_y: f64, goal_yaw: f64) -> Self {
        Self {
            table_number: table_number.into(),
            goal_x,
            goal_y,
            goal_yaw,
        }
    }
}

/// Service-level errors for coordinate registry operations.
#[derive(Debug, Error)]
pub enum CoordinateRegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CoordinateDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CoordinateRepositoryError),
    /// No coordinates are registered for the table.
    #[error("coordinates for table '{0}' not found")]
    NotFound(TableNumber),
}

/// Result type for coordinate registry service operations.
pub type CoordinateRegistryResult<T> = Result<T, CoordinateRegistryError>;

/// Coordinate registry orchestration service.
#[derive(Clone)]
pub struct CoordinateRegistryService<R>
where
    R: CoordinateRepository,
{
    repository: Arc<R>,
}

impl<R> CoordinateRegistryService<R>
where
    R: CoordinateRepository,
{
    /// Creates a new coordinate registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers the goal pose for a table.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateRegistryError::Domain`] when the table number or
    /// pose is invalid, or [`CoordinateRegistryError::Repository`] when the
    /// table is already registered or storage fails.
    pub async fn register(
        &self,
        request: RegisterCoordinateRequest,
    ) -> CoordinateRegistryResult<TableCoordinate> {
        let RegisterCoordinateRequest {
            table_number,
            goal_x,
            goal_y,
            goal_yaw,
        } = request;

        let registration = CoordinateRegistration::new(
            TableNumber::new(table_number)?,
            GoalPose::new(goal_x, goal_y, goal_yaw)?,
        );
        match self.repository.register(&registration).await {
            Ok(coordinate) => {
                info!(
                    table_number = %coordinate.table_number(),
                    coordinate_id = %coordinate.id(),
                    "registered table coordinates"
                );
                Ok(coordinate)
            }
            Err(err) => {
                warn!(
                    table_number = %registration.table_number(),
                    error = %err,
                    "coordinate registration rejected"
                );
                Err(err.into())
            }
        }
    }

    /// Resolves the coordinates registered for a table.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateRegistryError::NotFound`] when the table is not
    /// registered, or [`CoordinateRegistryError::Repository`] when storage
    /// fails.
    pub async fn lookup(
        &self,
        table_number: &TableNumber,
    ) -> CoordinateRegistryResult<TableCoordinate> {
        debug!(table_number = %table_number, "looking up table coordinates");
        self.repository
            .find_by_table_number(table_number)
            .await?
            .ok_or_else(|| CoordinateRegistryError::NotFound(table_number.clone()))
    }

    /// Lists registered coordinates in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateRegistryError::Repository`] when storage fails.
    pub async fn list(&self, page: Page) -> CoordinateRegistryResult<Vec<TableCoordinate>> {
        debug!(
            offset = page.offset(),
            limit = page.limit(),
            "listing table coordinates"
        );
        Ok(self.repository.list(page).await?)
    }
}
