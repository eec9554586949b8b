//! Money type with fixed two-decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are stored as `rust_decimal::Decimal` rescaled to exactly two
//! fraction digits, and serialize as decimal strings (e.g. `"1234.56"`) so
//! they round-trip across the wire without precision loss.

use rust_decimal::Decimal;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors from parsing money values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// The input is not a valid decimal number.
    #[error("Invalid money amount: {0}")]
    Invalid(String),

    /// The input carries more than two fraction digits.
    #[error("Money amount has more than two fraction digits: {0}")]
    TooPrecise(String),
}

/// A monetary amount with exactly two fraction digits.
///
/// Internally a `Decimal` pinned to scale 2, so equality, ordering, and
/// addition behave exactly like integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::from_parts(0, 0, 0, false, 2));

    /// Creates a money amount from a decimal, rounding to two fraction
    /// digits with banker's rounding.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        let mut rounded = amount.round_dp(2);
        rounded.rescale(2);
        Self(rounded)
    }

    /// Creates a money amount from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Returns the underlying decimal amount (scale 2).
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the amount as integer cents.
    #[must_use]
    pub const fn cents(&self) -> i128 {
        self.0.mantissa()
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed: Decimal = s
            .trim()
            .parse()
            .map_err(|_| MoneyError::Invalid(s.to_string()))?;
        if parsed != parsed.round_dp(2) {
            return Err(MoneyError::TooPrecise(s.to_string()));
        }
        Ok(Self::new(parsed))
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
