//! `PostgreSQL` adapters for coordinate registry persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresCoordinateRepository;
