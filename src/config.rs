//! Configuration loading and validation

use crate::directory::{Customer, InMemoryDirectory};
use crate::error::{Error, Result};
use crate::ledger::{AccountKind, CustomerId, Money};

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Number of worker threads applying operations concurrently
    #[serde(default = "default_workers")]
    pub workers: usize,

    #[serde(default)]
    pub customers: Vec<CustomerSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerSettings {
    pub id: CustomerId,
    pub name: String,
    pub password: String,

    /// Kind of account to open for this customer at startup. Customers
    /// without one can authenticate, but have nothing to operate on.
    #[serde(default)]
    pub account: Option<AccountKind>,

    /// Overrides the kind's default opening balance.
    #[serde(default)]
    pub opening_balance: Option<Decimal>,
}

fn default_workers() -> usize {
    4
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            customers: Vec::new(),
        }
    }
}

impl Settings {
    /// Load configuration from file (if it exists), then from `BANK__*`
    /// environment variables.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            .set_default("workers", default_workers() as i64)?
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("BANK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::Config("workers must be at least 1".to_string()));
        }

        let mut seen = HashSet::new();
        for customer in &self.customers {
            if !seen.insert(customer.id) {
                return Err(Error::Config(format!(
                    "customer {} is configured more than once",
                    customer.id
                )));
            }
        }

        Ok(())
    }

    pub fn directory(&self) -> InMemoryDirectory {
        let mut directory = InMemoryDirectory::new();
        for customer in &self.customers {
            directory.insert(
                Customer::new(customer.id, customer.name.clone()),
                customer.password.clone(),
            );
        }

        directory
    }
}

impl CustomerSettings {
    /// The account to open for this customer, with its opening balance.
    pub fn account(&self) -> Result<Option<(AccountKind, Money)>> {
        let Some(kind) = self.account else {
            return Ok(None);
        };

        let opening_balance = match self.opening_balance {
            Some(amount) => Money::try_from(amount).map_err(|e| Error::Config(e.to_string()))?,
            None => kind.opening_balance(),
        };

        Ok(Some((kind, opening_balance)))
    }
}
