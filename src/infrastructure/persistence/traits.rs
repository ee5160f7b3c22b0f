//! # Repository Traits
//!
//! Port definitions for the customer store the address resolver reads.
//!
//! # Examples
//!
//! ```ignore
//! use estimated_shipping::infrastructure::persistence::traits::CustomerRepository;
//!
//! fn address_count(repo: &impl CustomerRepository, id: CustomerId) -> usize {
//!     repo.get(id).ok().flatten().map(|c| c.addresses().len()).unwrap_or(0)
//! }
//! ```

use crate::domain::entities::Customer;
use crate::domain::value_objects::CustomerId;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Read access to customer accounts and their address books.
pub trait CustomerRepository: Send + Sync + fmt::Debug {
    /// Gets a customer by ID.
    ///
    /// Returns `None` if the customer does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be queried.
    fn get(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
}
