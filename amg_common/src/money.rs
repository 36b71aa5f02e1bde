use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

//--------------------------------------       Money         ---------------------------------------------------------
/// An exact currency amount, stored as an integer number of minor units (cents).
///
/// Commerce APIs express prices as decimal strings ("150.00"). Keeping amounts in minor units means that equality
/// checks and arithmetic are exact, which the idempotency comparison relies on.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Money(i64);

op!(binary Money, Add, add);
op!(binary Money, Sub, sub);
op!(inplace Money, SubAssign, sub_assign);
op!(unary Money, Neg, neg);

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value is not a valid currency amount: {0}")]
pub struct MoneyConversionError(pub String);

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Money {}

impl FromStr for Money {
    type Err = MoneyConversionError;

    /// Parses a decimal string ("150.00", "-0.50", "12.5", "12") into minor units, without going through floating
    /// point. At most two fractional digits are accepted; a single digit is taken as tenths.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, magnitude) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let mut parts = magnitude.split('.');
        let whole = parts
            .next()
            .filter(|p| !p.is_empty())
            .and_then(|p| p.parse::<i64>().ok())
            .ok_or_else(|| MoneyConversionError(s.to_string()))?;
        let cents = match parts.next() {
            None | Some("") => 0,
            Some(frac) if frac.len() <= 2 && frac.chars().all(|c| c.is_ascii_digit()) => {
                let n = frac.parse::<i64>().map_err(|_| MoneyConversionError(s.to_string()))?;
                if frac.len() == 1 {
                    n * 10
                } else {
                    n
                }
            },
            Some(_) => return Err(MoneyConversionError(s.to_string())),
        };
        if parts.next().is_some() {
            return Err(MoneyConversionError(s.to_string()));
        }
        let value = 100 * whole + cents;
        Ok(Self(if negative { -value } else { value }))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (sign, abs) = if self.0 < 0 { ("-", -self.0) } else { ("", self.0) };
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Money {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn from_major_units(units: i64) -> Self {
        Self(units * 100)
    }
}
