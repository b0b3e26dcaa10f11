//! Identifier types for orders and tokens
//!
//! All identifiers are opaque: they are supplied by the batch instance and
//! carried through to the settlement artifact unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an order
///
/// Opaque key assigned by whoever produced the batch instance; the solver
/// never interprets it beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Token symbol drawn from the two-element universe of a batch
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TokenId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Ordered token pair (base, quote)
///
/// Fixes the direction of the clearing rate: the rate is expressed in quote
/// units per base unit. Buy orders buy the base token; sell orders sell it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPair {
    base: TokenId,
    quote: TokenId,
}

impl TokenPair {
    /// Create a new TokenPair
    ///
    /// # Panics
    /// Panics if base and quote are the same token
    pub fn new(base: TokenId, quote: TokenId) -> Self {
        assert!(base != quote, "TokenPair requires two distinct tokens");
        Self { base, quote }
    }

    /// Try to create a TokenPair, returning None if the tokens coincide
    pub fn try_new(base: TokenId, quote: TokenId) -> Option<Self> {
        if base == quote {
            None
        } else {
            Some(Self { base, quote })
        }
    }

    pub fn base(&self) -> &TokenId {
        &self.base
    }

    pub fn quote(&self) -> &TokenId {
        &self.quote
    }

    /// Check whether a token belongs to this pair
    pub fn contains(&self, token: &TokenId) -> bool {
        *token == self.base || *token == self.quote
    }

    /// The same pair with rate direction reversed
    pub fn swapped(&self) -> Self {
        Self {
            base: self.quote.clone(),
            quote: self.base.clone(),
        }
    }
}

impl fmt::Display for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}
