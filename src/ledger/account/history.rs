use crate::ledger::{AccountKind, AccountNumber, CustomerId, Kind, Money, SequenceNumber};
use crate::ledger::transaction::TransactionRecord;

use super::account::Account;
use std::ops::Index;
use std::sync::Arc;

/// A frozen copy of an account's log, in commit order.
///
/// Taking one holds the guard only for as long as the copy takes. After
/// that, it can be iterated as many times as needed, from any thread, without
/// blocking deposits or withdrawals. Cloning it is cheap.
#[derive(Debug, Clone)]
pub struct History {
    records: Arc<[TransactionRecord]>,
}

impl History {
    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, sequence: SequenceNumber) -> Option<&TransactionRecord> {
        let index = usize::try_from(sequence.checked_sub(1)?).ok()?;
        self.records.get(index)
    }

    /// Committed deposits minus committed withdrawals.
    pub fn net_change(&self) -> i128 {
        self.records
            .iter()
            .map(|record| match record.kind() {
                Kind::Deposit => i128::from(record.amount().minor()),
                Kind::Withdraw => -i128::from(record.amount().minor()),
                Kind::FailedDeposit | Kind::FailedWithdraw => 0,
            })
            .sum()
    }
}

impl Index<usize> for History {
    type Output = TransactionRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a TransactionRecord;
    type IntoIter = std::slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Everything a report needs to know about an account, read at a single
/// instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub account_number: AccountNumber,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub kind: AccountKind,
    pub opening_balance: Money,
    pub balance: Money,
    pub interest: Money,
    pub deposits: usize,
    pub withdrawals: usize,
    pub failed: usize,
}

impl Account {
    /// Snapshot of every record, successful or not, in commit order.
    pub fn transactions(&self) -> History {
        let records = self.state.lock().log.to_vec();

        History {
            records: records.into(),
        }
    }

    pub fn statement(&self) -> Statement {
        let (balance, deposits, withdrawals, failed) = {
            let state = self.state.lock();
            (
                state.balance.amount(),
                state.log.count(Kind::Deposit),
                state.log.count(Kind::Withdraw),
                state.log.count(Kind::FailedDeposit) + state.log.count(Kind::FailedWithdraw),
            )
        };

        Statement {
            account_number: self.number(),
            customer_id: self.customer().id,
            customer_name: self.customer().name.clone(),
            kind: self.kind(),
            opening_balance: self.opening_balance(),
            balance,
            interest: self.kind().calculate_interest(balance),
            deposits,
            withdrawals,
            failed,
        }
    }
}
