use crate::ledger::{Kind, Money};

use super::account::{Account, State, TransactionError};

impl Account {
    /// Credit `amount` to the account, and return the new balance.
    ///
    /// Non-positive amounts are rejected up front, without touching the log.
    /// A deposit that would overflow the balance is refused and recorded as
    /// a failed deposit.
    pub fn deposit(&self, amount: Money) -> Result<Money, TransactionError> {
        Self::validate_amount(amount)?;

        let result = self.state.lock().commit_deposit(amount);

        match &result {
            Ok(balance) => tracing::debug!(account = self.number(), %amount, %balance, "deposit"),
            Err(err) => tracing::warn!(account = self.number(), %amount, %err, "deposit refused"),
        }

        result
    }
}

impl State {
    fn commit_deposit(&mut self, amount: Money) -> Result<Money, TransactionError> {
        if let Err(err) = self.balance.add(amount) {
            self.log.append(Kind::FailedDeposit, amount);
            return Err(err);
        }

        self.log.append(Kind::Deposit, amount);
        Ok(self.balance.amount())
    }
}

#[cfg(test)]
mod deposit_tests {
    use crate::ledger::account::account::{tests::open, TransactionError};
    use crate::ledger::{AccountKind, Kind, Money};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_deposit_ok() {
        let acc = open(AccountKind::Savings, Money::from_major(5_000));

        let got = acc.deposit(Money::from_major(250));
        assert_eq!(Ok(Money::from_major(5_250)), got);
        assert_eq!(Money::from_major(5_250), acc.balance());
        assert_eq!(25_000, acc.total_deposited());

        let history = acc.transactions();
        assert_eq!(1, history.len());
        assert_eq!(Kind::Deposit, history[0].kind());
        assert_eq!(Money::from_major(250), history[0].amount());
    }

    #[test]
    fn test_deposit_invalid_amount() {
        let acc = open(AccountKind::Savings, Money::from_major(5_000));

        for amount in vec![Money::from_major(-5), Money::ZERO, Money::from_minor(-1)] {
            let got = acc.deposit(amount);
            assert_eq!(Err(TransactionError::InvalidAmount { amount }), got);
        }

        assert_eq!(Money::from_major(5_000), acc.balance());
        assert!(acc.transactions().is_empty());
    }

    #[test]
    fn test_deposit_overflow() {
        let acc = open(AccountKind::Current, Money::from_minor(i64::MAX - 10));

        let got = acc.deposit(Money::from_minor(11));
        assert_eq!(Err(TransactionError::Overflow), got);
        assert_eq!(Money::from_minor(i64::MAX - 10), acc.balance());

        let history = acc.transactions();
        assert_eq!(1, history.len());
        assert_eq!(Kind::FailedDeposit, history[0].kind());
    }

    #[test]
    // Large amounts moving in and back out must not use up the room left for
    // later deposits.
    fn test_deposit_after_large_round_trip() {
        let acc = open(AccountKind::Current, Money::from_major(10_000));
        let large = Money::from_minor(i64::MAX / 2);

        for _ in 0..3 {
            assert!(acc.deposit(large).is_ok());
            assert_eq!(Ok(Money::from_major(10_000)), acc.withdraw(large));
        }

        assert_eq!(
            Ok(Money::from_major(10_000).checked_add(large).unwrap()),
            acc.deposit(large)
        );
        assert_eq!(3 * i128::from(i64::MAX / 2), acc.total_withdrawn());

        let history = acc.transactions();
        assert_eq!(7, history.len());
        assert!(history.iter().all(|r| !r.kind().is_failure()));
    }

    #[test]
    // Each thread reads the balance, sleeps, then commits, all under the
    // guard. Every read must see the previous thread's commit: no two
    // threads start from the same balance, and no update is lost.
    fn test_slow_read_modify_write_under_the_guard() {
        let acc = Arc::new(open(AccountKind::Savings, Money::from_major(5_000)));

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let acc = Arc::clone(&acc);
                thread::spawn(move || {
                    let mut state = acc.state.lock();
                    let seen = state.balance.amount();
                    thread::sleep(Duration::from_millis(5));
                    let after = state.commit_deposit(Money::from_major(1)).unwrap();
                    assert_eq!(seen.checked_add(Money::from_major(1)), Some(after));
                    seen
                })
            })
            .collect();
        let mut seen: Vec<Money> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        seen.sort();
        seen.dedup();

        assert_eq!(20, seen.len());
        assert_eq!(Money::from_major(5_020), acc.balance());
        assert_eq!(20, acc.transactions().len());
    }
}
