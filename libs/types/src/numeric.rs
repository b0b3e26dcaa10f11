//! Exact rational types for rates and amounts
//!
//! Every comparison and closed-form rate computation in the matching core is
//! carried out on arbitrary-precision rationals; fixed-precision arithmetic
//! would silently break the balance and fill invariants under division.
//! Serialized as strings to prevent JSON number precision loss.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from constructing numeric values out of untrusted text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumericError {
    #[error("invalid rational literal: {0:?}")]
    Parse(String),

    #[error("rate must be positive, got {0}")]
    NonPositiveRate(String),

    #[error("amount cannot be negative, got {0}")]
    NegativeAmount(String),
}

/// Parse a rational literal: integer (`"25"`), fraction (`"3/2"`) or plain
/// decimal (`"2.5"`). A single leading sign is accepted.
pub fn parse_rational(s: &str) -> Result<BigRational, NumericError> {
    let trimmed = s.trim();
    let err = || NumericError::Parse(s.to_string());

    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    if body.is_empty() {
        return Err(err());
    }

    let value = if let Some((numer, denom)) = body.split_once('/') {
        let numer: BigInt = numer.parse().map_err(|_| err())?;
        let denom: BigInt = denom.parse().map_err(|_| err())?;
        if denom.is_zero() {
            return Err(err());
        }
        BigRational::new(numer, denom)
    } else if let Some((int_part, frac_part)) = body.split_once('.') {
        if frac_part.is_empty() || !frac_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(err());
        }
        let int: BigInt = if int_part.is_empty() {
            BigInt::zero()
        } else {
            int_part.parse().map_err(|_| err())?
        };
        if int.is_negative() {
            return Err(err());
        }
        let scale = num_traits::pow(BigInt::from(10u8), frac_part.len());
        let frac: BigInt = frac_part.parse().map_err(|_| err())?;
        BigRational::new(int * &scale + frac, scale)
    } else {
        BigRational::from_integer(body.parse().map_err(|_| err())?)
    };

    Ok(if negative { -value } else { value })
}

/// Exchange rate with exact rational representation
///
/// Used for limit prices and the uniform clearing rate. Must always be
/// strictly positive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rate(BigRational);

impl Rate {
    /// Create a new Rate from a rational
    ///
    /// # Panics
    /// Panics if the rate is negative or zero
    pub fn new(value: BigRational) -> Self {
        assert!(value.is_positive(), "Rate must be positive");
        Self(value)
    }

    /// Try to create a Rate, returning None if invalid
    pub fn try_new(value: BigRational) -> Option<Self> {
        if value.is_positive() {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create from integer (for testing/convenience)
    pub fn from_integer(value: u64) -> Self {
        Self::new(BigRational::from_integer(BigInt::from(value)))
    }

    /// Create from a numerator/denominator pair
    pub fn from_ratio(numer: u64, denom: u64) -> Self {
        Self::new(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    /// Get the inner rational value
    pub fn as_ratio(&self) -> &BigRational {
        &self.0
    }

    /// Reciprocal rate (quote and base swapped)
    pub fn recip(&self) -> Self {
        Self(BigRational::one() / &self.0)
    }
}

impl FromStr for Rate {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_rational(s)?;
        Self::try_new(value).ok_or_else(|| NumericError::NonPositiveRate(s.to_string()))
    }
}

// Custom serialization to preserve precision
impl Serialize for Rate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token amount with exact rational representation
///
/// Used for maximum and executed sell/buy amounts. Never negative; zero is a
/// valid executed amount.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(BigRational);

impl Amount {
    /// Create a new Amount from a rational
    ///
    /// # Panics
    /// Panics if the amount is negative
    pub fn new(value: BigRational) -> Self {
        assert!(!value.is_negative(), "Amount cannot be negative");
        Self(value)
    }

    /// Try to create an Amount, returning None if negative
    pub fn try_new(value: BigRational) -> Option<Self> {
        if value.is_negative() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    /// Create from integer (for testing/convenience)
    pub fn from_integer(value: u64) -> Self {
        Self(BigRational::from_integer(BigInt::from(value)))
    }

    /// Create from a numerator/denominator pair
    pub fn from_ratio(numer: u64, denom: u64) -> Self {
        Self::new(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    /// Get the inner rational value
    pub fn as_ratio(&self) -> &BigRational {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Amount {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_rational(s)?;
        Self::try_new(value).ok_or_else(|| NumericError::NegativeAmount(s.to_string()))
    }
}

// Custom serialization to preserve precision
impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serde adapter for raw signed rationals (e.g. the objective value)
pub mod rational_str {
    use super::parse_rational;
    use num_rational::BigRational;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &BigRational, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigRational, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_rational(&s).map_err(serde::de::Error::custom)
    }
}
