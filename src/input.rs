use crate::error::Error;
use crate::ledger::{CustomerId, Money};

use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::mpsc::{self, Receiver, Sender};

/// One line of work for the ledger, as read from the input.
#[derive(Debug, PartialEq)]
pub struct Operation {
    pub customer: CustomerId,
    pub credential: String,
    pub kind: OperationKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OperationKind {
    Deposit(Money),
    Withdrawal(Money),
}

// Unlike a batch import, a bad row shouldn't stop the others: it is reported
// on the error channel, and the next row is read.
//
// Operations are streamed into a multi-consumer channel so that any number
// of workers can start applying them before the whole input is read. The
// channel is bounded: a slow ledger slows the reader down instead of piling
// the input up in memory.
pub fn parse(
    input_stream: (impl std::io::Read + Send + 'static),
    capacity: usize,
) -> (async_channel::Receiver<Operation>, Receiver<Error>) {
    let (operation_tx, operation_rx) = async_channel::bounded(capacity.max(1));
    let (error_tx, error_rx): (Sender<Error>, Receiver<Error>) = mpsc::channel();

    let buffered = std::io::BufReader::new(input_stream);
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(buffered);

    std::thread::spawn(move || {
        for record in reader.deserialize::<OperationRecord>() {
            match convert(record) {
                Ok(operation) => {
                    // All the workers are gone, nobody is left to apply anything.
                    if operation_tx.send_blocking(operation).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    // Would only fail if the error sink is gone, and then there's
                    // nobody to tell anyway.
                    let _ = error_tx.send(err);
                }
            };
        }
    });

    (operation_rx, error_rx)
}

// Convert from a csv deserialise result into an operation result.
fn convert(record: Result<OperationRecord, csv::Error>) -> Result<Operation, Error> {
    Operation::try_from(record?)
}

// I have an OperationRecord type because I can't directly deserialise into my
// "domain" type, i.e. Operation.
// See https://github.com/BurntSushi/rust-csv/issues/211.
#[derive(Debug, Deserialize)]
pub struct OperationRecord {
    #[serde(rename = "type")]
    op_type: OperationRecordType,

    customer: CustomerId,

    credential: String,

    amount: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationRecordType {
    Deposit,
    Withdrawal,
}

impl TryFrom<OperationRecord> for Operation {
    type Error = Error;

    fn try_from(record: OperationRecord) -> Result<Self, Self::Error> {
        let name = match record.op_type {
            OperationRecordType::Deposit => "deposit",
            OperationRecordType::Withdrawal => "withdrawal",
        };

        let amount = record
            .amount
            .ok_or_else(|| Error::Input(format!("missing amount for {}", name)))?;
        let amount = Money::try_from(amount).map_err(|err| Error::Input(err.to_string()))?;

        let kind = match record.op_type {
            OperationRecordType::Deposit => OperationKind::Deposit(amount),
            OperationRecordType::Withdrawal => OperationKind::Withdrawal(amount),
        };

        Ok(Self {
            customer: record.customer,
            credential: record.credential,
            kind,
        })
    }
}

#[cfg(test)]
mod parse_tests {
    use super::{parse, Operation, OperationKind};
    use crate::error::Error;
    use crate::ledger::Money;

    fn collect(data: &'static str) -> (Vec<Operation>, Vec<Error>) {
        let reader = std::io::Cursor::new(data);
        let (operations, errors) = parse(reader, 16);

        let mut got = Vec::new();
        while let Ok(operation) = operations.recv_blocking() {
            got.push(operation);
        }

        (got, errors.iter().collect())
    }

    #[test]
    // Parsing well-formed data should stream every operation.
    fn test_parse_ok() {
        let (operations, errors) = collect(
            r#"type,customer,credential,amount
deposit,101,maru123,100.0
withdrawal,101,maru123,4500
deposit,102,aditi123,0.015"#,
        );

        assert_eq!(0, errors.len());
        assert_eq!(
            vec![
                Operation {
                    customer: 101,
                    credential: "maru123".to_string(),
                    kind: OperationKind::Deposit(Money::from_major(100)),
                },
                Operation {
                    customer: 101,
                    credential: "maru123".to_string(),
                    kind: OperationKind::Withdrawal(Money::from_major(4_500)),
                },
                Operation {
                    customer: 102,
                    credential: "aditi123".to_string(),
                    kind: OperationKind::Deposit(Money::from_minor(2)), // rounded
                },
            ],
            operations
        );
    }

    #[test]
    fn test_parse_ok_with_whitespace() {
        let (operations, errors) = collect(
            r#"type,     customer,     credential,amount
deposit, 101, maru123, 1.0
   withdrawal , 101 , maru123 , 1.5   "#,
        );

        assert_eq!(2, operations.len());
        assert_eq!(0, errors.len());
    }

    #[test]
    // Negative amounts are the ledger's business, not the parser's.
    fn test_parse_keeps_negative_amounts() {
        let (operations, _) = collect(
            r#"type,customer,credential,amount
deposit,101,maru123,-5"#,
        );

        assert_eq!(OperationKind::Deposit(Money::from_major(-5)), operations[0].kind);
    }

    #[test]
    // Bad rows are reported, and don't stop the good ones.
    fn test_parse_invalid_rows() {
        let (operations, errors) = collect(
            r#"type,customer,credential,amount
transfer,101,maru123,1.0
deposit,,maru123,1.0
deposit,101,maru123,
deposit,101,maru123,2.0"#,
        );

        assert_eq!(1, operations.len());
        assert_eq!(OperationKind::Deposit(Money::from_major(2)), operations[0].kind);

        assert_eq!(3, errors.len());
        match &errors[0] {
            Error::Csv(msg) => assert!(msg.contains("unknown variant `transfer`"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
        match &errors[1] {
            Error::Csv(msg) => {
                assert!(msg.contains("cannot parse integer from empty string"), "{}", msg)
            }
            other => panic!("unexpected error: {:?}", other),
        }
        match &errors[2] {
            Error::Input(msg) => assert_eq!("missing amount for deposit", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
