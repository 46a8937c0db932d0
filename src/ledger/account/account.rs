use crate::directory::Customer;
use crate::ledger::{log::TransactionLog, AccountKind, AccountNumber, Money};

use super::balance::Balance;
use parking_lot::Mutex;
use std::sync::Arc;

/// Everything that can go wrong when operating on a single account.
///
/// A rejection never leaves the account half-updated: the balance is exactly
/// what it was before the call.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TransactionError {
    /// Deposits and withdrawals must be strictly positive.
    #[error("invalid amount {amount}: must be greater than zero")]
    InvalidAmount { amount: Money },

    /// The withdrawal would leave less than the minimum balance.
    #[error("insufficient funds: {shortfall} short of the minimum balance")]
    InsufficientFunds { shortfall: Money },

    /// Adding or removing this amount would overflow the balance.
    #[error("amount would overflow the balance")]
    Overflow,
}

/// A bank account: a balance and its history, behind one guard.
///
/// The balance and the log are never locked separately. Whoever holds the
/// guard sees a balance that matches the log exactly, and whatever they commit
/// lands in both at once.
///
/// An account is shared by reference (`Arc<Account>`) between every caller
/// that needs it; distinct accounts have distinct guards, so they never
/// contend with each other.
pub struct Account {
    number: AccountNumber,
    customer: Arc<Customer>,
    kind: AccountKind,
    opening_balance: Money,

    pub(super) state: Mutex<State>,
}

pub(super) struct State {
    pub(super) balance: Balance,
    pub(super) log: TransactionLog,
}

impl Account {
    /// Open an account. The opening balance is not a transaction, and doesn't
    /// appear in the log.
    pub fn new(
        number: AccountNumber,
        customer: Arc<Customer>,
        kind: AccountKind,
        opening_balance: Money,
    ) -> Result<Self, TransactionError> {
        if opening_balance.is_negative() {
            return Err(TransactionError::InvalidAmount {
                amount: opening_balance,
            });
        }

        Ok(Self {
            number,
            customer,
            kind,
            opening_balance,
            state: Mutex::new(State {
                balance: Balance::new(opening_balance),
                log: TransactionLog::new(),
            }),
        })
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn opening_balance(&self) -> Money {
        self.opening_balance
    }

    /// Current balance, read under the guard so it's never observed halfway
    /// through a deposit or withdrawal.
    pub fn balance(&self) -> Money {
        self.state.lock().balance.amount()
    }

    /// Sum of every committed deposit in minor units, opening balance
    /// excluded. Wider than `Money`: money can go in and out many times.
    pub fn total_deposited(&self) -> i128 {
        self.state.lock().balance.credit()
    }

    /// Sum of every committed withdrawal, in minor units.
    pub fn total_withdrawn(&self) -> i128 {
        self.state.lock().balance.debit()
    }

    /// Validation shared by deposits and withdrawals. Runs before the guard is
    /// taken: invalid amounts never reach the log.
    pub(super) fn validate_amount(amount: Money) -> Result<(), TransactionError> {
        if amount.is_positive() {
            Ok(())
        } else {
            Err(TransactionError::InvalidAmount { amount })
        }
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("number", &self.number)
            .field("customer", &self.customer.id)
            .field("kind", &self.kind)
            .field("balance", &self.balance())
            .finish()
    }
}
