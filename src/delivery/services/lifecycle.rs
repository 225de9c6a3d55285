//! Service layer for the navigation goal status lifecycle and queries.
//!
//! Both staff and the robot write through this service. Status writes always
//! land on the goal; an order's status is only ever read through from its
//! goal, so the two cannot drift apart.

use crate::delivery::{
    domain::{
        DeliveryDomainError, GoalId, GoalMeta, GoalStatus, NavigationGoal, Order, OrderId,
        TransitionPolicy,
    },
    ports::{DeliveryRepository, DeliveryRepositoryError},
};
use crate::page::Page;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for goal lifecycle operations.
#[derive(Debug, Error)]
pub enum GoalLifecycleError {
    /// Domain rules rejected the change.
    #[error(transparent)]
    Domain(#[from] DeliveryDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(DeliveryRepositoryError),
    /// The navigation goal does not exist.
    #[error("navigation goal not found: {0}")]
    GoalNotFound(GoalId),
    /// The order does not exist.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),
    /// The order exists but has no paired navigation goal.
    #[error("order {0} has no navigation goal")]
    OrderWithoutGoal(OrderId),
}

impl From<DeliveryRepositoryError> for GoalLifecycleError {
    fn from(err: DeliveryRepositoryError) -> Self {
        match err {
            DeliveryRepositoryError::GoalNotFound(id) => Self::GoalNotFound(id),
            DeliveryRepositoryError::OrderNotFound(id) => Self::OrderNotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for goal lifecycle service operations.
pub type GoalLifecycleResult<T> = Result<T, GoalLifecycleError>;

/// Conditional status writes re-read the goal at most this many times.
const MAX_STATUS_WRITE_ATTEMPTS: u32 = 3;

/// Goal status, telemetry and query orchestration service.
#[derive(Clone)]
pub struct GoalLifecycleService<D, K>
where
    D: DeliveryRepository,
    K: Clock + Send + Sync,
{
    repository: Arc<D>,
    clock: Arc<K>,
    policy: TransitionPolicy,
}

impl<D, K> GoalLifecycleService<D, K>
where
    D: DeliveryRepository,
    K: Clock + Send + Sync,
{
    /// Creates a new lifecycle service enforcing `policy` on status writes.
    #[must_use]
    pub const fn new(repository: Arc<D>, clock: Arc<K>, policy: TransitionPolicy) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    /// Writes a goal's status; used by the robot.
    ///
    /// # Errors
    ///
    /// Returns [`GoalLifecycleError::GoalNotFound`] when the goal does not
    /// exist, [`GoalLifecycleError::Domain`] when the transition policy
    /// rejects the change, or [`GoalLifecycleError::Repository`] when storage
    /// fails or the goal keeps changing under a conditional write.
    ///
    /// Under [`TransitionPolicy::ForwardOnly`] the write is conditional on
    /// the status that was read; if another writer got there first the goal
    /// is re-read and the policy checked again against the stored status.
    pub async fn set_goal_status(
        &self,
        goal_id: GoalId,
        status: GoalStatus,
    ) -> GoalLifecycleResult<NavigationGoal> {
        let goal = self.require_goal(goal_id).await?;
        self.write_status(goal, status).await
    }

    /// Writes the status of an order's goal; used by the staff dashboard.
    ///
    /// Returns the order with its updated goal attached.
    ///
    /// # Errors
    ///
    /// Returns [`GoalLifecycleError::OrderNotFound`] when the order does not
    /// exist, [`GoalLifecycleError::OrderWithoutGoal`] when the pairing is
    /// broken, [`GoalLifecycleError::Domain`] when the transition policy
    /// rejects the change, or [`GoalLifecycleError::Repository`] when storage
    /// fails.
    pub async fn set_order_status(
        &self,
        order_id: OrderId,
        status: GoalStatus,
    ) -> GoalLifecycleResult<Order> {
        let order = self.get_order(order_id).await?;
        let goal = order
            .navigation_goal()
            .cloned()
            .ok_or(GoalLifecycleError::OrderWithoutGoal(order_id))?;
        let updated = self.write_status(goal, status).await?;
        Ok(order.with_navigation_goal(updated))
    }

    /// Replaces a goal's telemetry document wholesale; used by the robot.
    ///
    /// # Errors
    ///
    /// Returns [`GoalLifecycleError::GoalNotFound`] when the goal does not
    /// exist or [`GoalLifecycleError::Repository`] when storage fails.
    pub async fn set_goal_meta(
        &self,
        goal_id: GoalId,
        meta: GoalMeta,
    ) -> GoalLifecycleResult<NavigationGoal> {
        let mut goal = self.require_goal(goal_id).await?;
        goal.replace_meta(meta, &*self.clock);
        let stored = self.repository.update_goal_meta(&goal).await?;
        info!(goal_id = %goal_id, "replaced navigation goal meta");
        Ok(stored)
    }

    /// Fetches a navigation goal.
    ///
    /// # Errors
    ///
    /// Returns [`GoalLifecycleError::GoalNotFound`] when the goal does not
    /// exist or [`GoalLifecycleError::Repository`] when storage fails.
    pub async fn get_goal(&self, goal_id: GoalId) -> GoalLifecycleResult<NavigationGoal> {
        self.require_goal(goal_id).await
    }

    /// Fetches an order with its goal attached.
    ///
    /// # Errors
    ///
    /// Returns [`GoalLifecycleError::OrderNotFound`] when the order does not
    /// exist or [`GoalLifecycleError::Repository`] when storage fails.
    pub async fn get_order(&self, order_id: OrderId) -> GoalLifecycleResult<Order> {
        self.repository
            .find_order(order_id)
            .await?
            .ok_or(GoalLifecycleError::OrderNotFound(order_id))
    }

    /// Lists orders, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`GoalLifecycleError::Repository`] when storage fails.
    pub async fn list_orders(&self, page: Page) -> GoalLifecycleResult<Vec<Order>> {
        debug!(offset = page.offset(), limit = page.limit(), "listing orders");
        Ok(self.repository.list_orders(page).await?)
    }

    /// Lists goals oldest first so the robot drains its queue in FIFO order.
    ///
    /// # Errors
    ///
    /// Returns [`GoalLifecycleError::Repository`] when storage fails.
    pub async fn list_goals(
        &self,
        status: Option<GoalStatus>,
        page: Page,
    ) -> GoalLifecycleResult<Vec<NavigationGoal>> {
        debug!(
            status = status.map(GoalStatus::as_str),
            offset = page.offset(),
            limit = page.limit(),
            "listing navigation goals"
        );
        Ok(self.repository.list_goals(status, page).await?)
    }

    /// Deletes an order and its goal.
    ///
    /// # Errors
    ///
    /// Returns [`GoalLifecycleError::OrderNotFound`] when the order does not
    /// exist or [`GoalLifecycleError::Repository`] when storage fails.
    pub async fn delete_order(&self, order_id: OrderId) -> GoalLifecycleResult<()> {
        self.repository.delete_order(order_id).await?;
        info!(order_id = %order_id, "deleted order and navigation goal");
        Ok(())
    }

    async fn require_goal(&self, goal_id: GoalId) -> GoalLifecycleResult<NavigationGoal> {
        self.repository
            .find_goal(goal_id)
            .await?
            .ok_or(GoalLifecycleError::GoalNotFound(goal_id))
    }

    async fn write_status(
        &self,
        mut goal: NavigationGoal,
        status: GoalStatus,
    ) -> GoalLifecycleResult<NavigationGoal> {
        let mut attempt = 1;
        loop {
            let previous = goal.status();
            if let Err(err) = goal.set_status(status, self.policy, &*self.clock) {
                warn!(
                    goal_id = %goal.id(),
                    from = %previous,
                    to = %status,
                    policy = %self.policy,
                    "navigation goal status change rejected"
                );
                return Err(err.into());
            }
            let expected = match self.policy {
                TransitionPolicy::Permissive => None,
                TransitionPolicy::ForwardOnly => Some(previous),
            };
            match self.repository.update_goal_status(&goal, expected).await {
                Ok(stored) => {
                    info!(
                        goal_id = %stored.id(),
                        order_id = %stored.order_id(),
                        from = %previous,
                        to = %stored.status(),
                        "navigation goal status changed"
                    );
                    return Ok(stored);
                }
                Err(DeliveryRepositoryError::StatusConflict { goal_id, actual, .. })
                    if attempt < MAX_STATUS_WRITE_ATTEMPTS =>
                {
                    debug!(
                        goal_id = %goal_id,
                        read = %previous,
                        stored = %actual,
                        attempt,
                        "navigation goal status moved underneath write, re-reading"
                    );
                    attempt += 1;
                    goal = self.require_goal(goal_id).await?;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
