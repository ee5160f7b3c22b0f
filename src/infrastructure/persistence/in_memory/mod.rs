//! # In-Memory Repositories
//!
//! - [`InMemoryCustomerRepository`]: customer accounts and address books
//!
//! Storage is an `Arc<RwLock<HashMap>>` so clones can be shared across
//! services.

pub mod customer_repository;

pub use customer_repository::InMemoryCustomerRepository;
