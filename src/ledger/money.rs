use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::DECIMAL_PRECISION;

const MINOR_PER_MAJOR: i64 = 10_i64.pow(DECIMAL_PRECISION);

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum MoneyError {
    #[error("amount {0} cannot be represented in minor units")]
    OutOfRange(Decimal),
}

/// An exact amount of money, stored as a count of minor units.
///
/// I decided against floats for the same reason as everywhere else money is
/// involved: 0.1 + 0.2 must be 0.3. Decimals are used at the edges (parsing,
/// display, serialisation), integers for everything the ledger computes.
///
/// Money is signed on purpose. Callers may hand us `-5` or `0`, and we need to
/// be able to represent those to reject them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "Decimal", try_from = "Decimal")]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Build an amount from whole currency units, e.g. `from_major(1000)` is 1000.00.
    pub const fn from_major(major: i64) -> Self {
        Self(major * MINOR_PER_MAJOR)
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Apply a rate given in basis points, truncating toward zero.
    ///
    /// Splitting the amount around 10 000 keeps every intermediate product
    /// within `i64` for any rate up to 100%.
    pub(crate) const fn apply_basis_points(self, basis_points: u16) -> Money {
        let bps = basis_points as i64;
        let whole = self.0 / 10_000;
        let rest = self.0 % 10_000;

        Money(whole * bps + rest * bps / 10_000)
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, DECIMAL_PRECISION)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    // Amounts are rounded to the minor unit first, like every amount read
    // from the outside world.
    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        amount
            .round_dp(DECIMAL_PRECISION)
            .checked_mul(Decimal::from(MINOR_PER_MAJOR))
            .and_then(|minor| minor.to_i64())
            .map(Money)
            .ok_or(MoneyError::OutOfRange(amount))
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.to_decimal()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

#[cfg(test)]
mod money_tests {
    use super::{Money, MoneyError};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_from_decimal() {
        for (raw, want) in vec![
            (dec!(1000), Money::from_major(1000)),
            (dec!(0.01), Money::from_minor(1)),
            (dec!(12.345), Money::from_minor(1234)), // banker's rounding
            (dec!(12.355), Money::from_minor(1236)),
            (dec!(-5), Money::from_minor(-500)),
            (dec!(0), Money::ZERO),
        ] {
            assert_eq!(Ok(want), Money::try_from(raw), "{}", raw);
        }
    }

    #[test]
    fn test_from_decimal_out_of_range() {
        let very_big_number = Decimal::from_str("70000000000000000000000000000").unwrap();
        assert_eq!(
            Err(MoneyError::OutOfRange(very_big_number)),
            Money::try_from(very_big_number)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!("1500.00", Money::from_major(1500).to_string());
        assert_eq!("0.05", Money::from_minor(5).to_string());
        assert_eq!("-5.00", Money::from_major(-5).to_string());
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::from_minor(i64::MAX);
        assert_eq!(None, max.checked_add(Money::from_minor(1)));
        assert_eq!(
            Some(Money::from_major(3)),
            Money::from_major(5).checked_sub(Money::from_major(2))
        );
    }

    #[test]
    fn test_apply_basis_points() {
        for (amount, bps, want) in vec![
            (Money::from_major(20_000), 600, Money::from_major(1_200)),
            (Money::from_major(5_000), 400, Money::from_major(200)),
            (Money::from_major(10_000), 0, Money::ZERO),
            (Money::from_minor(99), 400, Money::from_minor(3)), // 3.96 truncated
            (Money::from_minor(i64::MAX), 10_000, Money::from_minor(i64::MAX)),
        ] {
            assert_eq!(want, amount.apply_basis_points(bps));
        }
    }

    #[test]
    fn test_serde_as_decimal() {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);
        writer.serialize((Money::from_minor(150_050),)).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!("1500.50\n", out);
    }
}
