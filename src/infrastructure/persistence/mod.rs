//! # Persistence Layer
//!
//! ## Repository Traits (Ports)
//!
//! - [`CustomerRepository`]: customer accounts and address books
//!
//! ## Implementations
//!
//! - `in_memory`: in-memory implementations for testing

pub mod in_memory;
pub mod traits;

pub use in_memory::InMemoryCustomerRepository;
pub use traits::{CustomerRepository, RepositoryError, RepositoryResult};
