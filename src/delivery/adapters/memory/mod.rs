//! In-memory delivery task adapter.

mod repository;

pub use repository::InMemoryDeliveryRepository;
