//! # In-Memory Customer Repository
//!
//! In-memory implementation of [`CustomerRepository`] for tests and the CLI.

use crate::domain::entities::Customer;
use crate::domain::value_objects::CustomerId;
use crate::infrastructure::persistence::traits::{CustomerRepository, RepositoryResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory implementation of [`CustomerRepository`].
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerRepository {
    storage: Arc<RwLock<HashMap<CustomerId, Customer>>>,
}

impl InMemoryCustomerRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a customer.
    pub fn save(&self, customer: Customer) {
        self.storage.write().insert(customer.id(), customer);
    }

    /// Returns the number of customers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.read().len()
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CustomerRepository for InMemoryCustomerRepository {
    fn get(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        Ok(self.storage.read().get(&id).cloned())
    }
}
