//! Port contracts for delivery task storage.
//!
//! Ports define infrastructure-agnostic interfaces used by delivery services.

pub mod repository;

pub use repository::{DeliveryRepository, DeliveryRepositoryError, DeliveryRepositoryResult};
