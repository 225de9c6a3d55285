//! In-memory repository for delivery tasks.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::delivery::{
    domain::{
        GoalId, GoalStatus, NavigationGoal, Order, OrderDraft, OrderId, PersistedGoalData,
        PersistedOrderData,
    },
    ports::{DeliveryRepository, DeliveryRepositoryError, DeliveryRepositoryResult},
};
use crate::page::Page;

/// Thread-safe in-memory delivery repository.
///
/// A single lock guards orders and goals together, so readers never observe
/// half of a batch.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeliveryRepository {
    state: Arc<RwLock<InMemoryDeliveryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDeliveryState {
    last_order_id: i64,
    last_goal_id: i64,
    orders: BTreeMap<OrderId, Order>,
    goals: BTreeMap<GoalId, NavigationGoal>,
    goal_index: HashMap<OrderId, GoalId>,
}

impl InMemoryDeliveryRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl InMemoryDeliveryState {
    /// Returns the stored order with its current goal attached.
    fn hydrate(&self, order: &Order) -> Order {
        let navigation_goal = self
            .goal_index
            .get(&order.id())
            .and_then(|goal_id| self.goals.get(goal_id))
            .cloned();
        Order::from_persisted(PersistedOrderData {
            id: order.id(),
            table_number: order.table_number().clone(),
            pose: order.pose(),
            created_at: order.created_at(),
            navigation_goal,
        })
    }
}

fn poisoned(err: impl std::fmt::Display) -> DeliveryRepositoryError {
    DeliveryRepositoryError::unavailable(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl DeliveryRepository for InMemoryDeliveryRepository {
    async fn create_batch(&self, drafts: &[OrderDraft]) -> DeliveryRepositoryResult<Vec<Order>> {
        let mut state = self.state.write().map_err(poisoned)?;

        let mut next_order_id = state.last_order_id;
        let mut next_goal_id = state.last_goal_id;
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            next_order_id += 1;
            next_goal_id += 1;
            created.push(
                draft
                    .clone()
                    .into_order(OrderId::new(next_order_id), GoalId::new(next_goal_id)),
            );
        }

        state.last_order_id = next_order_id;
        state.last_goal_id = next_goal_id;
        for order in &created {
            if let Some(goal) = order.navigation_goal() {
                state.goal_index.insert(order.id(), goal.id());
                state.goals.insert(goal.id(), goal.clone());
            }
            state.orders.insert(order.id(), order.clone());
        }
        Ok(created)
    }

    async fn find_order(&self, id: OrderId) -> DeliveryRepositoryResult<Option<Order>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.orders.get(&id).map(|order| state.hydrate(order)))
    }

    async fn find_goal(&self, id: GoalId) -> DeliveryRepositoryResult<Option<NavigationGoal>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.goals.get(&id).cloned())
    }

    async fn update_goal_status(
        &self,
        goal: &NavigationGoal,
        expected: Option<GoalStatus>,
    ) -> DeliveryRepositoryResult<NavigationGoal> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .goals
            .get_mut(&goal.id())
            .ok_or(DeliveryRepositoryError::GoalNotFound(goal.id()))?;
        if let Some(wanted) = expected.filter(|status| *status != stored.status()) {
            return Err(DeliveryRepositoryError::StatusConflict {
                goal_id: goal.id(),
                expected: wanted,
                actual: stored.status(),
            });
        }
        let mut data = PersistedGoalData::from(stored.clone());
        data.status = goal.status();
        data.updated_at = goal.updated_at();
        *stored = NavigationGoal::from_persisted(data);
        Ok(stored.clone())
    }

    async fn update_goal_meta(
        &self,
        goal: &NavigationGoal,
    ) -> DeliveryRepositoryResult<NavigationGoal> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stored = state
            .goals
            .get_mut(&goal.id())
            .ok_or(DeliveryRepositoryError::GoalNotFound(goal.id()))?;
        let mut data = PersistedGoalData::from(stored.clone());
        data.meta = goal.meta().cloned();
        data.updated_at = goal.updated_at();
        *stored = NavigationGoal::from_persisted(data);
        Ok(stored.clone())
    }

    async fn list_orders(&self, page: Page) -> DeliveryRepositoryResult<Vec<Order>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(page.apply(state.orders.values().rev().map(|order| state.hydrate(order))))
    }

    async fn list_goals(
        &self,
        status: Option<GoalStatus>,
        page: Page,
    ) -> DeliveryRepositoryResult<Vec<NavigationGoal>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut goals: Vec<&NavigationGoal> = state
            .goals
            .values()
            .filter(|goal| status.is_none_or(|wanted| goal.status() == wanted))
            .collect();
        goals.sort_by_key(|goal| (goal.created_at(), goal.id()));
        Ok(page.apply(goals.into_iter().cloned()))
    }

    async fn delete_order(&self, id: OrderId) -> DeliveryRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.orders.remove(&id).is_none() {
            return Err(DeliveryRepositoryError::OrderNotFound(id));
        }
        if let Some(goal_id) = state.goal_index.remove(&id) {
            state.goals.remove(&goal_id);
        }
        Ok(())
    }
}
