//! In-memory repository for the coordinate registry.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::coordinate::{
    domain::{CoordinateId, CoordinateRegistration, TableCoordinate, TableNumber},
    ports::{CoordinateRepository, CoordinateRepositoryError, CoordinateRepositoryResult},
};
use crate::page::Page;

/// Thread-safe in-memory coordinate repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCoordinateRepository {
    state: Arc<RwLock<InMemoryCoordinateState>>,
}

#[derive(Debug, Default)]
struct InMemoryCoordinateState {
    last_id: i64,
    entries: Vec<TableCoordinate>,
    table_index: HashMap<TableNumber, usize>,
}

impl InMemoryCoordinateRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> CoordinateRepositoryError {
    CoordinateRepositoryError::unavailable(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CoordinateRepository for InMemoryCoordinateRepository {
    async fn register(
        &self,
        registration: &CoordinateRegistration,
    ) -> CoordinateRepositoryResult<TableCoordinate> {
        let mut state = self.state.write().map_err(poisoned)?;
        let table_number = registration.table_number();
        if state.table_index.contains_key(table_number) {
            return Err(CoordinateRepositoryError::DuplicateTableNumber(
                table_number.clone(),
            ));
        }

        state.last_id += 1;
        let coordinate = registration
            .clone()
            .into_coordinate(CoordinateId::new(state.last_id));
        let position = state.entries.len();
        state.table_index.insert(table_number.clone(), position);
        state.entries.push(coordinate.clone());
        Ok(coordinate)
    }

    async fn find_by_table_number(
        &self,
        table_number: &TableNumber,
    ) -> CoordinateRepositoryResult<Option<TableCoordinate>> {
        let state = self.state.read().map_err(poisoned)?;
        let coordinate = state
            .table_index
            .get(table_number)
            .and_then(|position| state.entries.get(*position))
            .cloned();
        Ok(coordinate)
    }

    async fn list(&self, page: Page) -> CoordinateRepositoryResult<Vec<TableCoordinate>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(page.apply(state.entries.iter().cloned()))
    }
}
