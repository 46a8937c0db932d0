//! Bank accounts whose balances are mutated concurrently by many callers.
//!
//! The interesting part is [`ledger`]: each account owns its balance and its
//! history behind a single guard, enforces its kind's withdrawal policy, and
//! records every attempted operation. Everything else is plumbing around it:
//! who the customers are ([`directory`]), which account belongs to whom
//! ([`registry`]), and a batch pipeline feeding operations to the ledger from
//! several threads ([`input`], [`process`], [`output`], [`run`]).

pub mod config;
pub mod directory;
pub mod error;
pub mod error_handler;
pub mod input;
pub mod ledger;
pub mod output;
pub mod process;
pub mod registry;
pub mod run;

pub use error::{Error, Result};
