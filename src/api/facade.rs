//! Entry points consumed by the HTTP collaborator.

use super::dto::{
    GoalListQuery, ListQuery, MetaUpdate, NavigationGoalResponse, OrderCreateBulk, OrderResponse,
    StatusUpdate, TableCoordinateCreate, TableCoordinateResponse,
};
use super::error::ApiResult;
use crate::config::DispatchConfig;
use crate::coordinate::{
    adapters::postgres::PostgresCoordinateRepository,
    domain::TableNumber,
    ports::CoordinateRepository,
    services::{CoordinateRegistryService, RegisterCoordinateRequest},
};
use crate::delivery::{
    adapters::postgres::PostgresDeliveryRepository,
    domain::{GoalId, GoalMeta, GoalStatus, OrderId, TransitionPolicy},
    ports::DeliveryRepository,
    services::{BulkIntakeService, CreateOrderBatchRequest, GoalLifecycleService},
};
use crate::storage::build_pool;
use mockable::{Clock, DefaultClock};
use std::sync::Arc;

/// Dispatch core wired to `PostgreSQL` storage and the system clock.
pub type PostgresDispatchApi =
    DispatchApi<PostgresCoordinateRepository, PostgresDeliveryRepository, DefaultClock>;

/// Validates boundary input and delegates to the dispatch services.
#[derive(Clone)]
pub struct DispatchApi<C, D, K>
where
    C: CoordinateRepository,
    D: DeliveryRepository,
    K: Clock + Send + Sync,
{
    registry: CoordinateRegistryService<C>,
    intake: BulkIntakeService<C, D, K>,
    lifecycle: GoalLifecycleService<D, K>,
}

impl PostgresDispatchApi {
    /// Builds the storage pool once and wires every service to it.
    #[must_use]
    pub fn from_config(config: &DispatchConfig) -> Self {
        let pool = build_pool(&config.store);
        Self::new(
            Arc::new(PostgresCoordinateRepository::new(pool.clone())),
            Arc::new(PostgresDeliveryRepository::new(pool)),
            Arc::new(DefaultClock),
            config.transition_policy,
        )
    }
}

impl<C, D, K> DispatchApi<C, D, K>
where
    C: CoordinateRepository,
    D: DeliveryRepository,
    K: Clock + Send + Sync,
{
    /// Wires the services around shared repositories and clock.
    #[must_use]
    pub fn new(
        coordinates: Arc<C>,
        deliveries: Arc<D>,
        clock: Arc<K>,
        policy: TransitionPolicy,
    ) -> Self {
        Self {
            registry: CoordinateRegistryService::new(Arc::clone(&coordinates)),
            intake: BulkIntakeService::new(
                coordinates,
                Arc::clone(&deliveries),
                Arc::clone(&clock),
            ),
            lifecycle: GoalLifecycleService::new(deliveries, clock, policy),
        }
    }

    /// Registers a table's goal pose.
    ///
    /// # Errors
    ///
    /// Returns `duplicate_key` when the table is already registered and
    /// `invalid_request` when the table number or pose is malformed.
    pub async fn register_coordinate(
        &self,
        body: TableCoordinateCreate,
    ) -> ApiResult<TableCoordinateResponse> {
        let request = RegisterCoordinateRequest::new(
            body.table_number,
            body.goal_x,
            body.goal_y,
            body.goal_yaw,
        );
        let coordinate = self.registry.register(request).await?;
        Ok((&coordinate).into())
    }

    /// Resolves the coordinates registered for a table.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the table is not registered.
    pub async fn lookup_coordinate(
        &self,
        table_number: &str,
    ) -> ApiResult<TableCoordinateResponse> {
        let table_number = TableNumber::new(table_number)?;
        let coordinate = self.registry.lookup(&table_number).await?;
        Ok((&coordinate).into())
    }

    /// Lists registered coordinates.
    ///
    /// # Errors
    ///
    /// Returns `storage_unavailable` when storage fails.
    pub async fn list_coordinates(
        &self,
        query: ListQuery,
    ) -> ApiResult<Vec<TableCoordinateResponse>> {
        let coordinates = self.registry.list(query.page()).await?;
        Ok(coordinates.iter().map(Into::into).collect())
    }

    /// Creates one queued order/goal pair per entry, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns `coordinate_not_found` naming the first unregistered table,
    /// `invalid_request` for an empty or malformed batch, and
    /// `storage_unavailable` when storage fails. No pair is created on error.
    pub async fn create_order_batch(&self, body: OrderCreateBulk) -> ApiResult<Vec<OrderResponse>> {
        let request =
            CreateOrderBatchRequest::new(body.orders.into_iter().map(|order| order.table_number));
        let orders = self.intake.create_batch(request).await?;
        Ok(orders.iter().map(Into::into).collect())
    }

    /// Lists orders, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns `storage_unavailable` when storage fails.
    pub async fn list_orders(&self, query: ListQuery) -> ApiResult<Vec<OrderResponse>> {
        let orders = self.lifecycle.list_orders(query.page()).await?;
        Ok(orders.iter().map(Into::into).collect())
    }

    /// Fetches one order with its derived status.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the order does not exist.
    pub async fn get_order(&self, order_id: i64) -> ApiResult<OrderResponse> {
        let order = self.lifecycle.get_order(OrderId::new(order_id)).await?;
        Ok((&order).into())
    }

    /// Sets the status of an order's goal on behalf of staff.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` for an unknown status, `not_found` when the
    /// order does not exist and `transition_rejected` when the configured
    /// policy forbids the change.
    pub async fn set_order_status(
        &self,
        order_id: i64,
        body: StatusUpdate,
    ) -> ApiResult<OrderResponse> {
        let status = GoalStatus::try_from(body.status.as_str())?;
        let order = self
            .lifecycle
            .set_order_status(OrderId::new(order_id), status)
            .await?;
        Ok((&order).into())
    }

    /// Deletes an order together with its goal.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the order does not exist.
    pub async fn delete_order(&self, order_id: i64) -> ApiResult<()> {
        self.lifecycle.delete_order(OrderId::new(order_id)).await?;
        Ok(())
    }

    /// Lists goals oldest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` for an unknown status filter.
    pub async fn list_goals(&self, query: GoalListQuery) -> ApiResult<Vec<NavigationGoalResponse>> {
        let status = query
            .status
            .as_deref()
            .map(GoalStatus::try_from)
            .transpose()?;
        let goals = self.lifecycle.list_goals(status, query.page()).await?;
        Ok(goals.iter().map(Into::into).collect())
    }

    /// Fetches one navigation goal.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the goal does not exist.
    pub async fn get_goal(&self, goal_id: i64) -> ApiResult<NavigationGoalResponse> {
        let goal = self.lifecycle.get_goal(GoalId::new(goal_id)).await?;
        Ok((&goal).into())
    }

    /// Sets a goal's status on behalf of the robot.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` for an unknown status, `not_found` when the
    /// goal does not exist and `transition_rejected` when the configured
    /// policy forbids the change.
    pub async fn set_goal_status(
        &self,
        goal_id: i64,
        body: StatusUpdate,
    ) -> ApiResult<NavigationGoalResponse> {
        let status = GoalStatus::try_from(body.status.as_str())?;
        let goal = self
            .lifecycle
            .set_goal_status(GoalId::new(goal_id), status)
            .await?;
        Ok((&goal).into())
    }

    /// Replaces a goal's telemetry document.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the goal does not exist.
    pub async fn set_goal_meta(
        &self,
        goal_id: i64,
        body: MetaUpdate,
    ) -> ApiResult<NavigationGoalResponse> {
        let goal = self
            .lifecycle
            .set_goal_meta(GoalId::new(goal_id), GoalMeta::new(body.meta))
            .await?;
        Ok((&goal).into())
    }
}
