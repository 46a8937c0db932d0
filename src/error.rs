//! Errors raised around the ledger: configuration, I/O, the directory and
//! the registry. Errors raised by an account itself are `TransactionError`s.

use crate::ledger::{CustomerId, Money, TransactionError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Invalid input record: {0}")]
    Input(String),

    // The same error for an unknown customer and a wrong credential, so
    // callers can't probe for valid ids.
    #[error("Authentication failed for customer {0}")]
    AuthenticationFailure(CustomerId),

    #[error("No account for customer {0}")]
    AccountNotFound(CustomerId),

    #[error("Opening balance must not be negative, got {0}")]
    InvalidOpeningBalance(Money),

    #[error("Customer {customer}: {source}")]
    Transaction {
        customer: CustomerId,
        #[source]
        source: TransactionError,
    },
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Csv(e.to_string())
    }
}

impl Error {
    /// Whether the ledger refused the operation (as opposed to the operation
    /// never reaching an account).
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Transaction { .. })
    }
}
