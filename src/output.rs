use crate::ledger::{Account, AccountKind, AccountNumber, CustomerId, Kind, Money, SequenceNumber};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct StatementRecord<'a> {
    #[serde(rename = "account")]
    account_number: AccountNumber,

    #[serde(rename = "customer")]
    customer_id: CustomerId,

    name: &'a str,

    kind: AccountKind,

    #[serde(rename = "opening")]
    opening_balance: Money,

    balance: Money,

    interest: Money,

    deposits: usize,

    withdrawals: usize,

    failed: usize,
}

#[derive(Serialize)]
struct HistoryRecord {
    #[serde(rename = "account")]
    account_number: AccountNumber,

    sequence: SequenceNumber,

    timestamp: DateTime<Utc>,

    kind: Kind,

    amount: Money,
}

// Writes one statement per account to the given stream.
pub fn write_statements(
    output_stream: impl std::io::Write,
    accounts: &[Arc<Account>],
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(output_stream);

    for account in accounts {
        let statement = account.statement();
        writer.serialize(StatementRecord {
            account_number: statement.account_number,
            customer_id: statement.customer_id,
            name: &statement.customer_name,
            kind: statement.kind,
            opening_balance: statement.opening_balance,
            balance: statement.balance,
            interest: statement.interest,
            deposits: statement.deposits,
            withdrawals: statement.withdrawals,
            failed: statement.failed,
        })?;
    }

    writer.flush()?;
    Ok(())
}

// Writes every record of every account, account by account, in commit order.
pub fn write_history(
    output_stream: impl std::io::Write,
    accounts: &[Arc<Account>],
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(output_stream);

    for account in accounts {
        for record in &account.transactions() {
            writer.serialize(HistoryRecord {
                account_number: account.number(),
                sequence: record.sequence(),
                timestamp: record.timestamp(),
                kind: record.kind(),
                amount: record.amount(),
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}
