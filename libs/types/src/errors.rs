//! Error taxonomy for batch ingest
//!
//! Only malformed orders are errors; the absence of a feasible match is a
//! structured solver outcome, and per-candidate numeric failures are absorbed
//! inside the matching core.

use crate::ids::{OrderId, TokenId, TokenPair};
use thiserror::Error;

/// Order-level validation errors, fatal at ingest
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("order {id}: max sell amount must be positive")]
    NonPositiveMaxSell { id: OrderId },

    #[error("order {id}: buy and sell token are identical ({token})")]
    SameToken { id: OrderId, token: TokenId },

    #[error("order {id}: tokens {buy}/{sell} do not form the pair {pair}")]
    OutsidePair {
        id: OrderId,
        buy: TokenId,
        sell: TokenId,
        pair: TokenPair,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_error_display() {
        let err = OrderError::NonPositiveMaxSell {
            id: OrderId::from("o1"),
        };
        assert_eq!(err.to_string(), "order o1: max sell amount must be positive");
    }

    #[test]
    fn test_outside_pair_display() {
        let err = OrderError::OutsidePair {
            id: OrderId::from("o2"),
            buy: TokenId::from("USDC"),
            sell: TokenId::from("DAI"),
            pair: TokenPair::new(TokenId::from("ETH"), TokenId::from("DAI")),
        };
        assert!(err.to_string().contains("USDC"));
        assert!(err.to_string().contains("ETH/DAI"));
    }
}
