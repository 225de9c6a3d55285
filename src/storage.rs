//! Shared `PostgreSQL` pool construction and blocking helpers.
//!
//! Diesel is synchronous, so adapters offload each unit of work to the
//! blocking thread pool and hold a pooled connection only for its duration.

use crate::config::StoreConfig;
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};

/// `PostgreSQL` connection pool shared by the dispatch repositories.
pub type DispatchPgPool = Pool<ConnectionManager<PgConnection>>;

/// Pooled connection checked out for a single unit of work.
pub type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Builds the connection pool described by `config`.
///
/// The pool is created lazily so startup does not fail while the database is
/// still coming up; the first checkout surfaces connection problems.
#[must_use]
pub fn build_pool(config: &StoreConfig) -> DispatchPgPool {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url.clone());
    Pool::builder()
        .max_size(config.max_pool_size)
        .connection_timeout(config.connect_timeout())
        .build_unchecked(manager)
}

/// Runs a blocking task and maps join errors into the caller's error type.
pub(crate) async fn run_blocking_with<F, T, E, M>(f: F, map_err: M) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: FnOnce(tokio::task::JoinError) -> E,
{
    tokio::task::spawn_blocking(f).await.map_err(map_err)?
}

/// Obtains a connection from the pool with a caller-provided error mapper.
pub(crate) fn get_conn_with<E, M>(pool: &DispatchPgPool, map_err: M) -> Result<PooledConn, E>
where
    M: FnOnce(PoolError) -> E,
{
    pool.get().map_err(map_err)
}
