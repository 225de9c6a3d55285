//! `PostgreSQL` adapters for delivery task persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresDeliveryRepository;
