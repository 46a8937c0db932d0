use crate::ledger::Money;

use super::account::TransactionError;

/// The balance of an account, along with the running totals of what went in
/// (deposits) and out (withdrawals) since it was opened.
///
/// Only `amount` decides whether an operation fits. The totals are kept wide
/// enough that money moving in and back out can never overflow them.
#[derive(Debug, Clone)]
pub struct Balance {
    amount: Money,
    credit: i128,
    debit: i128,
}

impl Balance {
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Sum of every deposit, in minor units. The opening balance isn't one.
    pub fn credit(&self) -> i128 {
        self.credit
    }

    /// Sum of every withdrawal, in minor units.
    pub fn debit(&self) -> i128 {
        self.debit
    }

    /// On error, the balance is left untouched.
    pub fn add(&mut self, amount: Money) -> Result<(), TransactionError> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(TransactionError::Overflow)?;
        self.credit += i128::from(amount.minor());

        Ok(())
    }

    /// On error, the balance is left untouched.
    pub fn subtract(&mut self, amount: Money) -> Result<(), TransactionError> {
        self.amount = self
            .amount
            .checked_sub(amount)
            .ok_or(TransactionError::Overflow)?;
        self.debit += i128::from(amount.minor());

        Ok(())
    }

    pub const fn new(opening: Money) -> Self {
        Self {
            amount: opening,
            credit: 0,
            debit: 0,
        }
    }
}
