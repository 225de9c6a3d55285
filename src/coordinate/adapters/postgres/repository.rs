//! `PostgreSQL` repository implementation for the coordinate registry.

use super::{
    models::{CoordinateRow, NewCoordinateRow},
    schema::table_coordinates,
};
use crate::coordinate::{
    domain::{CoordinateId, CoordinateRegistration, GoalPose, TableCoordinate, TableNumber},
    ports::{CoordinateRepository, CoordinateRepositoryError, CoordinateRepositoryResult},
};
use crate::page::Page;
use crate::storage::{DispatchPgPool, get_conn_with, run_blocking_with};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed coordinate repository.
#[derive(Debug, Clone)]
pub struct PostgresCoordinateRepository {
    pool: DispatchPgPool,
}

impl PostgresCoordinateRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DispatchPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CoordinateRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CoordinateRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection =
                    get_conn_with(&pool, CoordinateRepositoryError::unavailable)?;
                f(&mut connection)
            },
            CoordinateRepositoryError::unavailable,
        )
        .await
    }
}

#[async_trait]
impl CoordinateRepository for PostgresCoordinateRepository {
    async fn register(
        &self,
        registration: &CoordinateRegistration,
    ) -> CoordinateRepositoryResult<TableCoordinate> {
        let table_number = registration.table_number().clone();
        let pose = registration.pose();
        let new_row = NewCoordinateRow {
            table_number: table_number.as_str().to_owned(),
            goal_x: pose.x(),
            goal_y: pose.y(),
            goal_yaw: pose.yaw(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(table_coordinates::table)
                .values(&new_row)
                .returning(CoordinateRow::as_returning())
                .get_result::<CoordinateRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CoordinateRepositoryError::DuplicateTableNumber(table_number.clone())
                    }
                    _ => CoordinateRepositoryError::unavailable(err),
                })?;
            row_to_coordinate(row)
        })
        .await
    }

    async fn find_by_table_number(
        &self,
        table_number: &TableNumber,
    ) -> CoordinateRepositoryResult<Option<TableCoordinate>> {
        let lookup = table_number.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = table_coordinates::table
                .filter(table_coordinates::table_number.eq(lookup))
                .select(CoordinateRow::as_select())
                .first::<CoordinateRow>(connection)
                .optional()
                .map_err(CoordinateRepositoryError::unavailable)?;
            row.map(row_to_coordinate).transpose()
        })
        .await
    }

    async fn list(&self, page: Page) -> CoordinateRepositoryResult<Vec<TableCoordinate>> {
        self.run_blocking(move |connection| {
            let rows = table_coordinates::table
                .order(table_coordinates::id.asc())
                .offset(i64::from(page.offset()))
                .limit(i64::from(page.limit()))
                .select(CoordinateRow::as_select())
                .load::<CoordinateRow>(connection)
                .map_err(CoordinateRepositoryError::unavailable)?;
            rows.into_iter().map(row_to_coordinate).collect()
        })
        .await
    }
}

fn row_to_coordinate(row: CoordinateRow) -> CoordinateRepositoryResult<TableCoordinate> {
    let CoordinateRow {
        id,
        table_number: persisted_table_number,
        goal_x,
        goal_y,
        goal_yaw,
    } = row;

    let table_number = TableNumber::new(persisted_table_number)
        .map_err(CoordinateRepositoryError::invalid_persisted_data)?;
    let pose = GoalPose::new(goal_x, goal_y, goal_yaw)
        .map_err(CoordinateRepositoryError::invalid_persisted_data)?;
    Ok(TableCoordinate::from_persisted(
        CoordinateId::new(id),
        table_number,
        pose,
    ))
}
