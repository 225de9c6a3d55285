//! `PostgreSQL` repository implementation for delivery task storage.

use super::{
    models::{GoalRow, NewGoalRow, NewOrderRow, OrderRow},
    schema::{navigation_goals, orders},
};
use crate::coordinate::domain::{GoalPose, TableNumber};
use crate::delivery::{
    domain::{
        FrameId, GoalId, GoalMeta, GoalStatus, NavigationGoal, Order, OrderDraft, OrderId,
        PersistedGoalData, PersistedOrderData,
    },
    ports::{DeliveryRepository, DeliveryRepositoryError, DeliveryRepositoryResult},
};
use crate::page::Page;
use crate::storage::{DispatchPgPool, get_conn_with, run_blocking_with};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use serde_json::Value;

/// `PostgreSQL`-backed delivery repository.
#[derive(Debug, Clone)]
pub struct PostgresDeliveryRepository {
    pool: DispatchPgPool,
}

impl PostgresDeliveryRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DispatchPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DeliveryRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DeliveryRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, DeliveryRepositoryError::unavailable)?;
                f(&mut connection)
            },
            DeliveryRepositoryError::unavailable,
        )
        .await
    }
}

#[async_trait]
impl DeliveryRepository for PostgresDeliveryRepository {
    async fn create_batch(&self, drafts: &[OrderDraft]) -> DeliveryRepositoryResult<Vec<Order>> {
        let batch = drafts.to_vec();
        self.run_blocking(move |connection| {
            let rows = connection
                .transaction::<_, DieselError, _>(|tx| {
                    let mut created = Vec::with_capacity(batch.len());
                    for draft in &batch {
                        let order_row = diesel::insert_into(orders::table)
                            .values(&to_new_order_row(draft))
                            .returning(OrderRow::as_returning())
                            .get_result::<OrderRow>(tx)?;
                        let goal_row = diesel::insert_into(navigation_goals::table)
                            .values(&to_new_goal_row(order_row.id, draft))
                            .returning(GoalRow::as_returning())
                            .get_result::<GoalRow>(tx)?;
                        created.push((order_row, Some(goal_row)));
                    }
                    Ok(created)
                })
                .map_err(DeliveryRepositoryError::unavailable)?;

            rows.into_iter()
                .map(|(order_row, goal_row)| row_to_order(order_row, goal_row))
                .collect()
        })
        .await
    }

    async fn find_order(&self, id: OrderId) -> DeliveryRepositoryResult<Option<Order>> {
        self.run_blocking(move |connection| {
            let row = orders::table
                .left_join(navigation_goals::table)
                .filter(orders::id.eq(id.value()))
                .select((OrderRow::as_select(), Option::<GoalRow>::as_select()))
                .first::<(OrderRow, Option<GoalRow>)>(connection)
                .optional()
                .map_err(DeliveryRepositoryError::unavailable)?;
            row.map(|(order_row, goal_row)| row_to_order(order_row, goal_row))
                .transpose()
        })
        .await
    }

    async fn find_goal(&self, id: GoalId) -> DeliveryRepositoryResult<Option<NavigationGoal>> {
        self.run_blocking(move |connection| {
            let row = navigation_goals::table
                .find(id.value())
                .select(GoalRow::as_select())
                .first::<GoalRow>(connection)
                .optional()
                .map_err(DeliveryRepositoryError::unavailable)?;
            row.map(row_to_goal).transpose()
        })
        .await
    }

    async fn update_goal_status(
        &self,
        goal: &NavigationGoal,
        expected: Option<GoalStatus>,
    ) -> DeliveryRepositoryResult<NavigationGoal> {
        let goal_id = goal.id();
        let status = goal.status().as_str();
        let updated_at = goal.updated_at();
        self.run_blocking(move |connection| {
            let changes = (
                navigation_goals::status.eq(status),
                navigation_goals::updated_at.eq(updated_at),
            );
            let updated = match expected {
                Some(wanted) => diesel::update(
                    navigation_goals::table
                        .find(goal_id.value())
                        .filter(navigation_goals::status.eq(wanted.as_str())),
                )
                .set(changes)
                .returning(GoalRow::as_returning())
                .get_result::<GoalRow>(connection),
                None => diesel::update(navigation_goals::table.find(goal_id.value()))
                    .set(changes)
                    .returning(GoalRow::as_returning())
                    .get_result::<GoalRow>(connection),
            }
            .optional()
            .map_err(DeliveryRepositoryError::unavailable)?;

            match (updated, expected) {
                (Some(row), _) => row_to_goal(row),
                (None, None) => Err(DeliveryRepositoryError::GoalNotFound(goal_id)),
                (None, Some(wanted)) => {
                    let stored = navigation_goals::table
                        .find(goal_id.value())
                        .select(navigation_goals::status)
                        .first::<String>(connection)
                        .optional()
                        .map_err(DeliveryRepositoryError::unavailable)?
                        .ok_or(DeliveryRepositoryError::GoalNotFound(goal_id))?;
                    let actual = GoalStatus::try_from(stored.as_str())
                        .map_err(DeliveryRepositoryError::invalid_persisted_data)?;
                    Err(DeliveryRepositoryError::StatusConflict {
                        goal_id,
                        expected: wanted,
                        actual,
                    })
                }
            }
        })
        .await
    }

    async fn update_goal_meta(
        &self,
        goal: &NavigationGoal,
    ) -> DeliveryRepositoryResult<NavigationGoal> {
        let goal_id = goal.id();
        let meta = goal.meta().cloned().map(GoalMeta::into_value);
        let updated_at = goal.updated_at();
        self.run_blocking(move |connection| {
            let row = diesel::update(navigation_goals::table.find(goal_id.value()))
                .set((
                    navigation_goals::meta.eq(meta),
                    navigation_goals::updated_at.eq(updated_at),
                ))
                .returning(GoalRow::as_returning())
                .get_result::<GoalRow>(connection)
                .optional()
                .map_err(DeliveryRepositoryError::unavailable)?
                .ok_or(DeliveryRepositoryError::GoalNotFound(goal_id))?;
            row_to_goal(row)
        })
        .await
    }

    async fn list_orders(&self, page: Page) -> DeliveryRepositoryResult<Vec<Order>> {
        self.run_blocking(move |connection| {
            let rows = orders::table
                .left_join(navigation_goals::table)
                .order((orders::created_at.desc(), orders::id.desc()))
                .offset(i64::from(page.offset()))
                .limit(i64::from(page.limit()))
                .select((OrderRow::as_select(), Option::<GoalRow>::as_select()))
                .load::<(OrderRow, Option<GoalRow>)>(connection)
                .map_err(DeliveryRepositoryError::unavailable)?;
            rows.into_iter()
                .map(|(order_row, goal_row)| row_to_order(order_row, goal_row))
                .collect()
        })
        .await
    }

    async fn list_goals(
        &self,
        status: Option<GoalStatus>,
        page: Page,
    ) -> DeliveryRepositoryResult<Vec<NavigationGoal>> {
        self.run_blocking(move |connection| {
            let mut query = navigation_goals::table
                .select(GoalRow::as_select())
                .into_boxed();
            if let Some(wanted) = status {
                query = query.filter(navigation_goals::status.eq(wanted.as_str()));
            }
            let rows = query
                .order((navigation_goals::created_at.asc(), navigation_goals::id.asc()))
                .offset(i64::from(page.offset()))
                .limit(i64::from(page.limit()))
                .load::<GoalRow>(connection)
                .map_err(DeliveryRepositoryError::unavailable)?;
            rows.into_iter().map(row_to_goal).collect()
        })
        .await
    }

    async fn delete_order(&self, id: OrderId) -> DeliveryRepositoryResult<()> {
        self.run_blocking(move |connection| {
            // The goal row is removed by the ON DELETE CASCADE foreign key.
            let deleted = diesel::delete(orders::table.find(id.value()))
                .execute(connection)
                .map_err(DeliveryRepositoryError::unavailable)?;
            if deleted == 0 {
                return Err(DeliveryRepositoryError::OrderNotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_order_row(draft: &OrderDraft) -> NewOrderRow {
    let pose = draft.pose();
    NewOrderRow {
        table_number: draft.table_number().as_str().to_owned(),
        goal_x: pose.x(),
        goal_y: pose.y(),
        goal_yaw: pose.yaw(),
        created_at: draft.created_at(),
    }
}

fn to_new_goal_row(order_id: i64, draft: &OrderDraft) -> NewGoalRow {
    let pose = draft.pose();
    NewGoalRow {
        order_id,
        status: OrderDraft::INITIAL_STATUS.as_str().to_owned(),
        goal_x: pose.x(),
        goal_y: pose.y(),
        goal_yaw: pose.yaw(),
        frame_id: draft.frame_id().as_str().to_owned(),
        meta: None,
        created_at: draft.created_at(),
        updated_at: draft.created_at(),
    }
}

fn row_to_order(row: OrderRow, goal_row: Option<GoalRow>) -> DeliveryRepositoryResult<Order> {
    let OrderRow {
        id,
        table_number: persisted_table_number,
        goal_x,
        goal_y,
        goal_yaw,
        created_at,
    } = row;

    let table_number = TableNumber::new(persisted_table_number)
        .map_err(DeliveryRepositoryError::invalid_persisted_data)?;
    let pose = GoalPose::new(goal_x, goal_y, goal_yaw)
        .map_err(DeliveryRepositoryError::invalid_persisted_data)?;
    let navigation_goal = goal_row.map(row_to_goal).transpose()?;

    Ok(Order::from_persisted(PersistedOrderData {
        id: OrderId::new(id),
        table_number,
        pose,
        created_at,
        navigation_goal,
    }))
}

fn row_to_goal(row: GoalRow) -> DeliveryRepositoryResult<NavigationGoal> {
    let GoalRow {
        id,
        order_id,
        status: persisted_status,
        goal_x,
        goal_y,
        goal_yaw,
        frame_id: persisted_frame_id,
        meta: persisted_meta,
        created_at,
        updated_at,
    } = row;

    let status = GoalStatus::try_from(persisted_status.as_str())
        .map_err(DeliveryRepositoryError::invalid_persisted_data)?;
    let pose = GoalPose::new(goal_x, goal_y, goal_yaw)
        .map_err(DeliveryRepositoryError::invalid_persisted_data)?;
    let frame_id =
        FrameId::new(persisted_frame_id).map_err(DeliveryRepositoryError::invalid_persisted_data)?;
    let meta = persisted_meta.map(meta_from_value).transpose()?;

    Ok(NavigationGoal::from_persisted(PersistedGoalData {
        id: GoalId::new(id),
        order_id: OrderId::new(order_id),
        status,
        pose,
        frame_id,
        meta,
        created_at,
        updated_at,
    }))
}

fn meta_from_value(value: Value) -> DeliveryRepositoryResult<GoalMeta> {
    GoalMeta::from_value(value).ok_or_else(|| {
        DeliveryRepositoryError::invalid_persisted_data(std::io::Error::other(
            "navigation goal meta is not a JSON object",
        ))
    })
}
