//! Maps each customer to their one account.
//!
//! The registry is an ordinary value, created by whoever runs the bank and
//! passed to whatever needs it. It hands out `Arc<Account>`s: the account
//! itself does its own locking, the registry only guards the map.

use crate::directory::Customer;
use crate::error::{Error, Result};
use crate::ledger::{Account, AccountKind, AccountNumber, CustomerId, Money};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

const FIRST_ACCOUNT_NUMBER: AccountNumber = 1001;

pub struct AccountRegistry {
    accounts: DashMap<CustomerId, Arc<Account>>,
    next_number: AtomicU32,
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            next_number: AtomicU32::new(FIRST_ACCOUNT_NUMBER),
        }
    }

    /// Return the customer's account, opening it first if needed.
    ///
    /// A customer gets at most one account: once it exists, `kind` and
    /// `opening_balance` are ignored and the existing account is returned.
    pub fn get_or_create_account(
        &self,
        customer: Arc<Customer>,
        kind: AccountKind,
        opening_balance: Money,
    ) -> Result<Arc<Account>> {
        if opening_balance.is_negative() {
            return Err(Error::InvalidOpeningBalance(opening_balance));
        }

        // Holding the entry keeps two concurrent callers from both opening an
        // account for the same customer.
        match self.accounts.entry(customer.id) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let number = self.next_number.fetch_add(1, Ordering::Relaxed);
                let customer_id = customer.id;
                let account = Account::new(number, customer, kind, opening_balance)
                    .map_err(|source| Error::Transaction {
                        customer: customer_id,
                        source,
                    })?;

                tracing::info!(
                    account = number,
                    customer = customer_id,
                    %kind,
                    %opening_balance,
                    "account opened"
                );

                Ok(Arc::clone(entry.insert(Arc::new(account)).value()))
            }
        }
    }

    pub fn account(&self, customer_id: CustomerId) -> Result<Arc<Account>> {
        self.accounts
            .get(&customer_id)
            .map(|account| Arc::clone(account.value()))
            .ok_or(Error::AccountNotFound(customer_id))
    }

    /// Every account, by account number.
    pub fn accounts(&self) -> Vec<Arc<Account>> {
        let mut accounts: Vec<Arc<Account>> = self
            .accounts
            .iter()
            .map(|account| Arc::clone(account.value()))
            .collect();
        accounts.sort_by_key(|account| account.number());

        accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
