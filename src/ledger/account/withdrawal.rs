use crate::ledger::{AccountKind, Kind, Money};

use super::account::{Account, State, TransactionError};

impl Account {
    /// Debit `amount` from the account, and return the new balance.
    ///
    /// The account's policy has the final say: if the withdrawal would leave
    /// less than the minimum balance, it's recorded as failed and the
    /// shortfall is returned to the caller. We never retry.
    pub fn withdraw(&self, amount: Money) -> Result<Money, TransactionError> {
        Self::validate_amount(amount)?;

        let result = self.state.lock().commit_withdrawal(self.kind(), amount);

        match &result {
            Ok(balance) => tracing::debug!(account = self.number(), %amount, %balance, "withdrawal"),
            Err(err) => tracing::warn!(account = self.number(), %amount, %err, "withdrawal refused"),
        }

        result
    }
}

impl State {
    fn commit_withdrawal(
        &mut self,
        kind: AccountKind,
        amount: Money,
    ) -> Result<Money, TransactionError> {
        let available = self.balance.amount();

        if !kind.authorize_withdrawal(available, amount) {
            self.log.append(Kind::FailedWithdraw, amount);
            return Err(TransactionError::InsufficientFunds {
                shortfall: kind.shortfall(available, amount),
            });
        }

        if let Err(err) = self.balance.subtract(amount) {
            self.log.append(Kind::FailedWithdraw, amount);
            return Err(err);
        }

        self.log.append(Kind::Withdraw, amount);
        Ok(self.balance.amount())
    }
}
