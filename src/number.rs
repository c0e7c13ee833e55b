//! Exact decimal number type held by the accumulator.
//!
//! Wraps `rust_decimal` so integer and fractional inputs fold without
//! binary floating-point drift. Arithmetic is checked and reports overflow
//! instead of panicking.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A numeric value pushed onto the accumulator.
///
/// Equality is by value, so `2` and `2.0` compare equal. Display uses the
/// normalized form with trailing zeros stripped.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use accumulator_calc::Number;
///
/// let n = Number::from_str(" 2.50 ").unwrap();
/// assert_eq!(n.to_string(), "2.5");
/// assert_eq!(Number::from(3).to_string(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Number(Decimal);

impl Number {
    /// Zero value.
    pub const ZERO: Self = Number(Decimal::ZERO);

    /// One, the multiplicative identity.
    pub const ONE: Self = Number(Decimal::ONE);

    /// Wraps a `Decimal`.
    pub fn new(value: Decimal) -> Self {
        Number(value)
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Adds `rhs`, returning `None` on overflow.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Number)
    }

    /// Subtracts `rhs`, returning `None` on overflow.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Number)
    }

    /// Multiplies by `rhs`, returning `None` on overflow.
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        self.0.checked_mul(rhs.0).map(Number)
    }
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Number(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number(Decimal::from(value))
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number(Decimal::from(value))
    }
}

impl FromStr for Number {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed)?;
        Ok(Number(decimal))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Number::from_str(&s).map_err(serde::de::Error::custom)
    }
}
