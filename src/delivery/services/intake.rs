//! Service layer for atomic bulk order intake.

use crate::coordinate::{
    domain::{CoordinateDomainError, TableCoordinate, TableNumber},
    ports::{CoordinateRepository, CoordinateRepositoryError},
};
use crate::delivery::{
    domain::{Order, OrderDraft},
    ports::{DeliveryRepository, DeliveryRepositoryError},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating one order per table number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderBatchRequest {
    table_numbers: Vec<String>,
}

impl CreateOrderBatchRequest {
    /// Creates a request; orders are created in the given sequence.
    #[must_use]
    pub fn new<I, S>(table_numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table_numbers: table_numbers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Service-level errors for bulk intake.
#[derive(Debug, Error)]
pub enum BulkIntakeError {
    /// A table number in the batch is malformed.
    #[error(transparent)]
    Domain(#[from] CoordinateDomainError),
    /// The batch contains no table numbers.
    #[error("order batch must contain at least one table number")]
    EmptyBatch,
    /// A table number in the batch has no registered coordinates.
    #[error("coordinates for table '{0}' not found")]
    CoordinateNotFound(TableNumber),
    /// Coordinate lookup failed in storage.
    #[error(transparent)]
    Coordinates(#[from] CoordinateRepositoryError),
    /// Persisting the batch failed.
    #[error(transparent)]
    Repository(#[from] DeliveryRepositoryError),
}

/// Result type for bulk intake operations.
pub type BulkIntakeResult<T> = Result<T, BulkIntakeError>;

/// Resolves table numbers to coordinates and persists order/goal pairs.
#[derive(Clone)]
pub struct BulkIntakeService<C, D, K>
where
    C: CoordinateRepository,
    D: DeliveryRepository,
    K: Clock + Send + Sync,
{
    coordinates: Arc<C>,
    deliveries: Arc<D>,
    clock: Arc<K>,
}

impl<C, D, K> BulkIntakeService<C, D, K>
where
    C: CoordinateRepository,
    D: DeliveryRepository,
    K: Clock + Send + Sync,
{
    /// Creates a new bulk intake service.
    #[must_use]
    pub const fn new(coordinates: Arc<C>, deliveries: Arc<D>, clock: Arc<K>) -> Self {
        Self {
            coordinates,
            deliveries,
            clock,
        }
    }

    /// Creates one order and one queued navigation goal per table number.
    ///
    /// Every table number is validated and resolved before anything is
    /// written, and the batch is then committed as one unit, so a failure
    /// leaves no orders behind. Orders are returned in request order with
    /// their goals attached.
    ///
    /// # Errors
    ///
    /// Returns [`BulkIntakeError::EmptyBatch`] for an empty request,
    /// [`BulkIntakeError::Domain`] for a malformed table number,
    /// [`BulkIntakeError::CoordinateNotFound`] naming the first unregistered
    /// table, or a repository error when storage fails.
    pub async fn create_batch(
        &self,
        request: CreateOrderBatchRequest,
    ) -> BulkIntakeResult<Vec<Order>> {
        let table_numbers = request
            .table_numbers
            .into_iter()
            .map(TableNumber::new)
            .collect::<Result<Vec<_>, _>>()?;
        if table_numbers.is_empty() {
            return Err(BulkIntakeError::EmptyBatch);
        }

        let created_at = self.clock.utc();
        let mut resolved: HashMap<TableNumber, TableCoordinate> = HashMap::new();
        let mut drafts = Vec::with_capacity(table_numbers.len());
        for table_number in table_numbers {
            let coordinate = match resolved.get(&table_number) {
                Some(coordinate) => coordinate.clone(),
                None => {
                    let found = self
                        .coordinates
                        .find_by_table_number(&table_number)
                        .await?;
                    let Some(coordinate) = found else {
                        warn!(
                            table_number = %table_number,
                            "order batch references unregistered table"
                        );
                        return Err(BulkIntakeError::CoordinateNotFound(table_number));
                    };
                    resolved.insert(table_number, coordinate.clone());
                    coordinate
                }
            };
            drafts.push(OrderDraft::from_coordinate(&coordinate, created_at));
        }

        let orders = self.deliveries.create_batch(&drafts).await?;
        info!(batch_size = orders.len(), "created order batch");
        Ok(orders)
    }
}
