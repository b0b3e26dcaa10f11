//! Executed amounts and the settlement artifact
//!
//! An `Execution` records what a single order traded at the uniform clearing
//! rate; a `Settlement` is the complete winning candidate. Intermediate
//! candidates are discarded after comparison and never leave the solver.

use crate::ids::OrderId;
use crate::numeric::{rational_str, Amount, Rate};
use crate::order::Side;
use num_rational::BigRational;
use serde::{Deserialize, Serialize};

/// Executed amounts for a single order
///
/// `sell_amount` is what the order gave up, `buy_amount` what it received;
/// the two are tied by the clearing rate (buy = sell / rate on the buy side,
/// buy = sell * rate on the sell side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    pub order_id: OrderId,
    pub side: Side,
    pub sell_amount: Amount,
    pub buy_amount: Amount,
}

/// Winning candidate of a batch: the uniform clearing rate, the executions
/// with positive amounts and the attained objective value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub rate: Rate,
    pub executions: Vec<Execution>,
    #[serde(with = "rational_str")]
    pub objective: BigRational,
}

impl Settlement {
    /// Look up the execution of a specific order, if it traded
    pub fn execution_for(&self, id: &OrderId) -> Option<&Execution> {
        self.executions.iter().find(|e| e.order_id == *id)
    }

    /// Total quote-token amount sold by the buy side
    pub fn buy_side_volume(&self) -> BigRational {
        self.executions
            .iter()
            .filter(|e| e.side == Side::Buy)
            .map(|e| e.sell_amount.as_ratio().clone())
            .sum()
    }

    /// Total base-token amount sold by the sell side
    pub fn sell_side_volume(&self) -> BigRational {
        self.executions
            .iter()
            .filter(|e| e.side == Side::Sell)
            .map(|e| e.sell_amount.as_ratio().clone())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn execution(id: &str, side: Side, sell: u64, buy: u64) -> Execution {
        Execution {
            order_id: OrderId::from(id),
            side,
            sell_amount: Amount::from_integer(sell),
            buy_amount: Amount::from_integer(buy),
        }
    }

    fn settlement() -> Settlement {
        Settlement {
            rate: Rate::from_integer(1),
            executions: vec![
                execution("b1", Side::Buy, 10, 10),
                execution("s1", Side::Sell, 10, 10),
            ],
            objective: BigRational::from_integer(BigInt::from(10)),
        }
    }

    #[test]
    fn test_execution_lookup() {
        let s = settlement();
        assert!(s.execution_for(&OrderId::from("b1")).is_some());
        assert!(s.execution_for(&OrderId::from("missing")).is_none());
    }

    #[test]
    fn test_volumes() {
        let s = settlement();
        assert_eq!(s.buy_side_volume(), BigRational::from_integer(BigInt::from(10)));
        assert_eq!(s.sell_side_volume(), BigRational::from_integer(BigInt::from(10)));
    }

    #[test]
    fn test_settlement_serialization() {
        let s = settlement();
        let json = serde_json::to_string(&s).unwrap();
        let back: Settlement = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
