//! Post-checks on a reconstructed execution
//!
//! The greedy reconstruction guarantees these properties by construction;
//! they are re-checked at exact rational equality on every candidate anyway,
//! and a failing candidate is discarded without aborting the search.

use crate::book::{BookOrder, PairBook};
use crate::matching::amounts::FillOutcome;
use num_rational::BigRational;
use num_traits::Zero;
use thiserror::Error;
use types::order::FillClass;

/// Why a candidate rate was discarded
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    #[error("rate outside the overlap window")]
    RateOutOfBounds,

    #[error("no order executed")]
    NothingExecuted,

    #[error("executed amount exceeds max sell")]
    SellBoundExceeded,

    #[error("order executed beyond its limit price")]
    LimitViolated,

    #[error("quote-token balance broken")]
    Imbalanced,

    #[error("higher-priority order left unfilled")]
    PriorityInverted,

    #[error("neither side fully filled")]
    NeitherSideFull,
}

/// Check a reconstructed execution against the solution invariants
pub fn check(book: &PairBook, fill: &FillOutcome, rate: &BigRational) -> Result<(), RejectReason> {
    if fill.is_empty() {
        return Err(RejectReason::NothingExecuted);
    }

    // Sell-amount bounds and limit-price compatibility, both sides.
    for order in &book.buys {
        let executed = &fill.sell_amounts[order.index];
        if executed > &order.max_sell {
            return Err(RejectReason::SellBoundExceeded);
        }
        if !executed.is_zero() && *rate > order.bound {
            return Err(RejectReason::LimitViolated);
        }
    }
    for order in &book.sells {
        let executed = &fill.sell_amounts[order.index];
        if executed > &order.max_sell {
            return Err(RejectReason::SellBoundExceeded);
        }
        if !executed.is_zero() && *rate < order.bound {
            return Err(RejectReason::LimitViolated);
        }
    }

    // Exact quote-token balance.
    let bought: BigRational = book
        .buys
        .iter()
        .map(|o| fill.sell_amounts[o.index].clone())
        .sum();
    let sold: BigRational = book
        .sells
        .iter()
        .map(|o| fill.sell_amounts[o.index].clone())
        .sum();
    if bought != sold * rate {
        return Err(RejectReason::Imbalanced);
    }

    // Fill priority: in limit-price order each side must read as a run of
    // fully filled orders, at most one partial, then nothing.
    priority_pattern(&book.buys[..fill.executable_buys], &fill.sell_amounts)?;
    priority_pattern(&book.sells[..fill.executable_sells], &fill.sell_amounts)?;

    // At least one executable side is exhausted.
    let buys_full = book.buys[..fill.executable_buys]
        .iter()
        .all(|o| fill.sell_amounts[o.index] == o.max_sell);
    let sells_full = book.sells[..fill.executable_sells]
        .iter()
        .all(|o| fill.sell_amounts[o.index] == o.max_sell);
    if !buys_full && !sells_full {
        return Err(RejectReason::NeitherSideFull);
    }

    Ok(())
}

fn priority_pattern(
    orders: &[BookOrder],
    sell_amounts: &[BigRational],
) -> Result<(), RejectReason> {
    let mut tail_reached = false;
    for order in orders {
        let class = FillClass::classify(&sell_amounts[order.index], &order.max_sell);
        if tail_reached {
            if class != FillClass::Unfilled {
                return Err(RejectReason::PriorityInverted);
            }
        } else if class != FillClass::Filled {
            tail_reached = true;
        }
    }
    Ok(())
}
