//! The concurrency-safe core: accounts, their withdrawal policy and their
//! append-only transaction history.
//!
//! Account: owns a balance and a log behind a single guard.
//! AccountKind: the closed set of policies (Savings, Current, Privilege).
//! TransactionLog: ordered record of every attempted operation.

pub mod account;
pub mod log;
pub mod money;
pub mod policy;
pub mod transaction;

pub use account::{Account, History, Statement, TransactionError};
pub use money::{Money, MoneyError};
pub use policy::AccountKind;
pub use transaction::{Kind, TransactionRecord};

// Using named types doesn't provide any compiler help, but it helps a lot with
// readability: `HashMap<CustomerId, Arc<Account>>` needs no comment,
// `HashMap<u32, Arc<Account>>` would.
pub type CustomerId = u32;
pub type AccountNumber = u32;
pub type SequenceNumber = u64;

// Money is stored in minor units (paise). Any decimal input is rounded to this
// many places before being converted.
const DECIMAL_PRECISION: u32 = 2;
