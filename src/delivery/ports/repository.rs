//! Repository port for order and navigation goal persistence.

use crate::delivery::domain::{GoalId, GoalStatus, NavigationGoal, Order, OrderDraft, OrderId};
use crate::page::Page;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for delivery repository operations.
pub type DeliveryRepositoryResult<T> = Result<T, DeliveryRepositoryError>;

/// Delivery task persistence contract.
///
/// Every call is its own transaction. Reads observe a consistent snapshot and
/// never see part of a batch that is still being written.
#[async_trait]
pub trait DeliveryRepository: Send + Sync {
    /// Persists one order and one queued navigation goal per draft.
    ///
    /// The whole batch is committed at once; on any failure nothing is
    /// stored. Orders are returned in draft order with their goals attached.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryRepositoryError::Unavailable`] when the store fails.
    async fn create_batch(&self, drafts: &[OrderDraft]) -> DeliveryRepositoryResult<Vec<Order>>;

    /// Finds an order with its goal attached.
    ///
    /// Returns `None` when the order does not exist.
    async fn find_order(&self, id: OrderId) -> DeliveryRepositoryResult<Option<Order>>;

    /// Finds a navigation goal.
    ///
    /// Returns `None` when the goal does not exist.
    async fn find_goal(&self, id: GoalId) -> DeliveryRepositoryResult<Option<NavigationGoal>>;

    /// Persists a goal's status and `updated_at`, leaving its meta untouched.
    ///
    /// With `expected` set, the write only lands while the stored status
    /// still equals it. With `None` the stored status is overwritten and
    /// concurrent writers follow last-writer-wins. Returns the goal as stored
    /// after the write.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryRepositoryError::GoalNotFound`] when the goal does
    /// not exist, or [`DeliveryRepositoryError::StatusConflict`] when the
    /// stored status no longer matches `expected`.
    async fn update_goal_status(
        &self,
        goal: &NavigationGoal,
        expected: Option<GoalStatus>,
    ) -> DeliveryRepositoryResult<NavigationGoal>;

    /// Persists a goal's meta document and `updated_at`, leaving its status
    /// untouched. Returns the goal as stored after the write.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryRepositoryError::GoalNotFound`] when the goal does
    /// not exist.
    async fn update_goal_meta(
        &self,
        goal: &NavigationGoal,
    ) -> DeliveryRepositoryResult<NavigationGoal>;

    /// Lists orders, most recently created first.
    async fn list_orders(&self, page: Page) -> DeliveryRepositoryResult<Vec<Order>>;

    /// Lists goals oldest first, optionally restricted to one status.
    async fn list_goals(
        &self,
        status: Option<GoalStatus>,
        page: Page,
    ) -> DeliveryRepositoryResult<Vec<NavigationGoal>>;

    /// Deletes an order together with its goal.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryRepositoryError::OrderNotFound`] when the order does
    /// not exist.
    async fn delete_order(&self, id: OrderId) -> DeliveryRepositoryResult<()>;
}

/// Errors returned by delivery repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DeliveryRepositoryError {
    /// The order was not found.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// The navigation goal was not found.
    #[error("navigation goal not found: {0}")]
    GoalNotFound(GoalId),

    /// Another writer changed the goal's status since it was read.
    #[error("navigation goal {goal_id} status is {actual}, expected {expected}")]
    StatusConflict {
        /// Goal whose conditional write was refused.
        goal_id: GoalId,
        /// Status the writer based its change on.
        expected: GoalStatus,
        /// Status found in storage.
        actual: GoalStatus,
    },

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// The backing store is temporarily unreachable or failed mid-operation.
    #[error("storage unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl DeliveryRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a transient storage failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
