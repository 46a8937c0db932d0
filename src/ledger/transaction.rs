use super::{Money, SequenceNumber};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// What happened to an attempted operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Deposit,        // Credit committed.
    Withdraw,       // Debit committed.
    FailedWithdraw, // Debit refused; balance untouched.
    FailedDeposit,  // Credit refused; balance untouched.
}

impl Kind {
    pub const fn is_failure(self) -> bool {
        matches!(self, Kind::FailedWithdraw | Kind::FailedDeposit)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Deposit => "deposit",
            Kind::Withdraw => "withdraw",
            Kind::FailedWithdraw => "failed_withdraw",
            Kind::FailedDeposit => "failed_deposit",
        };
        f.write_str(name)
    }
}

/// One entry of an account's history. Immutable once committed.
///
/// Records are ordered by commit, i.e. by the order in which callers acquired
/// the account. The timestamp is informational: two records can share one,
/// the sequence number can't.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    sequence: SequenceNumber,
    timestamp: DateTime<Utc>,
    kind: Kind,
    amount: Money,
}

impl TransactionRecord {
    pub(super) fn new(sequence: SequenceNumber, kind: Kind, amount: Money) -> Self {
        Self {
            sequence,
            timestamp: Utc::now(),
            kind,
            amount,
        }
    }

    pub fn sequence(&self) -> SequenceNumber {
        self.sequence
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn amount(&self) -> Money {
        self.amount
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {}",
            self.sequence,
            self.timestamp.to_rfc3339(),
            self.kind,
            self.amount
        )
    }
}

#[test]
fn test_failure_kinds() {
    assert!(!Kind::Deposit.is_failure());
    assert!(!Kind::Withdraw.is_failure());
    assert!(Kind::FailedWithdraw.is_failure());
    assert!(Kind::FailedDeposit.is_failure());
}
