//! In-memory coordinate registry adapter.

mod repository;

pub use repository::InMemoryCoordinateRepository;
