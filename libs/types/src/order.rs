//! Order record and fill classification
//!
//! Orders are immutable: they are validated once at ingest and never mutated
//! by the matching core. Executed amounts live in separate records.

use crate::errors::OrderError;
use crate::ids::{OrderId, TokenId, TokenPair};
use crate::numeric::{Amount, Rate};
use num_rational::BigRational;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Order side relative to the base token of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buys the base token, sells the quote token
    Buy,
    /// Sells the base token, buys the quote token
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Fill class of an executed order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FillClass {
    /// Executed sell amount is zero
    Unfilled,
    /// Executed sell amount is strictly between zero and the maximum
    Partial,
    /// Executed sell amount equals the maximum
    Filled,
}

impl FillClass {
    /// Classify an executed sell amount against the order's maximum
    pub fn classify(executed: &BigRational, max_sell: &BigRational) -> Self {
        if executed.is_zero() {
            FillClass::Unfilled
        } else if executed == max_sell {
            FillClass::Filled
        } else {
            FillClass::Partial
        }
    }
}

/// Limit order on a token pair
///
/// `limit_price` is the maximum exchange rate the order accepts, expressed in
/// units of `sell_token` per unit of `buy_token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub buy_token: TokenId,
    pub sell_token: TokenId,
    pub max_sell: Amount,
    pub limit_price: Rate,
}

impl Order {
    /// Create a validated order
    pub fn new(
        id: OrderId,
        buy_token: TokenId,
        sell_token: TokenId,
        max_sell: Amount,
        limit_price: Rate,
    ) -> Result<Self, OrderError> {
        if buy_token == sell_token {
            return Err(OrderError::SameToken {
                id,
                token: buy_token,
            });
        }
        if max_sell.is_zero() {
            return Err(OrderError::NonPositiveMaxSell { id });
        }
        Ok(Self {
            id,
            buy_token,
            sell_token,
            max_sell,
            limit_price,
        })
    }

    /// Determine the order's side relative to a pair
    ///
    /// Fails when the order's tokens are not exactly the pair's tokens.
    pub fn side(&self, pair: &TokenPair) -> Result<Side, OrderError> {
        if self.buy_token == *pair.base() && self.sell_token == *pair.quote() {
            Ok(Side::Buy)
        } else if self.buy_token == *pair.quote() && self.sell_token == *pair.base() {
            Ok(Side::Sell)
        } else {
            Err(OrderError::OutsidePair {
                id: self.id.clone(),
                buy: self.buy_token.clone(),
                sell: self.sell_token.clone(),
                pair: pair.clone(),
            })
        }
    }

    /// The same order with the two token names exchanged
    ///
    /// Combined with reversing the pair direction this relabels an instance
    /// without changing its economics.
    pub fn swapped(&self) -> Self {
        Self {
            id: self.id.clone(),
            buy_token: self.sell_token.clone(),
            sell_token: self.buy_token.clone(),
            max_sell: self.max_sell.clone(),
            limit_price: self.limit_price.clone(),
        }
    }
}
