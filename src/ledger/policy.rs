use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Money;

/// The kind of an account, which fully determines its withdrawal policy.
///
/// Every kind uses the same rule (a withdrawal must leave at least the
/// minimum balance behind); only the constants differ. Keeping the rule in one
/// place means a new kind is a new row of constants, not new logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Savings,
    Current,
    Privilege,
}

impl AccountKind {
    pub const ALL: [AccountKind; 3] = [
        AccountKind::Savings,
        AccountKind::Current,
        AccountKind::Privilege,
    ];

    pub const fn min_balance(self) -> Money {
        match self {
            AccountKind::Savings => Money::from_major(1_000),
            AccountKind::Current => Money::from_major(5_000),
            AccountKind::Privilege => Money::from_major(10_000),
        }
    }

    /// Balance an account of this kind is opened with, unless told otherwise.
    pub const fn opening_balance(self) -> Money {
        match self {
            AccountKind::Savings => Money::from_major(5_000),
            AccountKind::Current => Money::from_major(10_000),
            AccountKind::Privilege => Money::from_major(20_000),
        }
    }

    // Current accounts never accrue interest.
    const fn interest_basis_points(self) -> u16 {
        match self {
            AccountKind::Savings => 400,
            AccountKind::Current => 0,
            AccountKind::Privilege => 600,
        }
    }

    /// Yearly interest rate, as a fraction (0.04 is 4%).
    pub fn interest_rate(self) -> Decimal {
        Decimal::new(i64::from(self.interest_basis_points()), 4).normalize()
    }

    /// A withdrawal is authorized iff it leaves at least the minimum balance.
    pub fn authorize_withdrawal(self, current_balance: Money, amount: Money) -> bool {
        match current_balance.checked_sub(amount) {
            Some(remaining) => remaining >= self.min_balance(),
            None => false,
        }
    }

    /// How much is missing for `amount` to be withdrawn from `current_balance`.
    /// Zero when the withdrawal is authorized.
    pub fn shortfall(self, current_balance: Money, amount: Money) -> Money {
        let required = amount.minor() as i128 + self.min_balance().minor() as i128;
        let missing = required - current_balance.minor() as i128;

        Money::from_minor(missing.clamp(0, i64::MAX as i128) as i64)
    }

    pub const fn calculate_interest(self, current_balance: Money) -> Money {
        current_balance.apply_basis_points(self.interest_basis_points())
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountKind::Savings => "savings",
            AccountKind::Current => "current",
            AccountKind::Privilege => "privilege",
        };
        f.write_str(name)
    }
}
