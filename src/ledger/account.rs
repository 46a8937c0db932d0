//! An account and the operations callers can run against it.
//!
//! Every operation lives in its own file, as an `impl Account` block with its
//! tests next to it. They all follow the same shape: take the guard, validate,
//! mutate or reject, append to the log, release.

#[allow(clippy::module_inception)]
mod account;
mod balance;
mod deposit;
mod history;
mod interest;
mod withdrawal;

pub use account::{Account, TransactionError};
pub use history::{History, Statement};
