//! Who the customers are, and whether they are who they claim to be.
//!
//! The ledger only ever sees a `Customer`; it never looks at credentials.

use crate::error::{Error, Result};
use crate::ledger::CustomerId;

use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

pub trait Directory: Send + Sync {
    fn authenticate(&self, id: CustomerId, credential: &str) -> Result<Arc<Customer>>;
}

struct Entry {
    customer: Arc<Customer>,
    credential: String,
}

/// A fixed set of customers, usually loaded from configuration.
#[derive(Default)]
pub struct InMemoryDirectory {
    entries: HashMap<CustomerId, Entry>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a customer. A later registration with the same id replaces the
    /// earlier one.
    pub fn insert(&mut self, customer: Customer, credential: impl Into<String>) {
        self.entries.insert(
            customer.id,
            Entry {
                customer: Arc::new(customer),
                credential: credential.into(),
            },
        );
    }

    /// Look a customer up without checking credentials, e.g. to provision
    /// their account.
    pub fn customer(&self, id: CustomerId) -> Option<Arc<Customer>> {
        self.entries.get(&id).map(|entry| Arc::clone(&entry.customer))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Directory for InMemoryDirectory {
    fn authenticate(&self, id: CustomerId, credential: &str) -> Result<Arc<Customer>> {
        match self.entries.get(&id) {
            Some(entry) if entry.credential == credential => Ok(Arc::clone(&entry.customer)),
            _ => Err(Error::AuthenticationFailure(id)),
        }
    }
}
