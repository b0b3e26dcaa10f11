//! Global driver
//!
//! Collects candidate clearing rates (every rate-interval endpoint plus the
//! interior closed-form roots of every candidate partition), reconstructs and
//! scores each, and keeps the best. Candidates are consumed as a stream;
//! nothing but the incumbent execution is retained, so peak memory stays
//! linear in the number of orders. Per-candidate numeric degeneracies and
//! invariant failures are absorbed here and never surface to the caller.

use crate::book::PairBook;
use crate::matching::amounts::FillOutcome;
use crate::matching::{
    fill_at_rate, interior_roots, interval_candidates, rate_endpoints, rate_intervals,
};
use crate::validate::RejectReason;
use crate::{objective, validate};
use num_rational::BigRational;
use num_traits::Zero;
use types::errors::OrderError;
use types::execution::{Execution, Settlement};
use types::ids::TokenPair;
use types::numeric::{Amount, Rate};
use types::order::{Order, Side};

/// Result of solving a batch
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// A clearing rate with at least one executed order
    Match(Settlement),
    /// No feasible match exists (empty side, no limit-price overlap, or every
    /// candidate rejected)
    NoMatch,
}

impl SolveOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, SolveOutcome::Match(_))
    }
}

/// Solve a batch of orders on a token pair
///
/// Returns the settlement maximizing the disregarded utility; ties between
/// equally good rates go to the smaller rate. Malformed orders fail the whole
/// batch.
pub fn solve(orders: &[Order], pair: &TokenPair) -> Result<SolveOutcome, OrderError> {
    let book = PairBook::new(orders, pair)?;

    if !book.has_overlap() {
        tracing::debug!("no overlap between buy and sell limit prices on {pair}");
        return Ok(SolveOutcome::NoMatch);
    }

    let endpoints = rate_endpoints(&book);
    let mut best: Option<Incumbent> = None;

    for rate in &endpoints {
        consider(&book, orders.len(), rate, &mut best);
    }

    for interval in rate_intervals(&endpoints) {
        for candidate in interval_candidates(&book, &interval) {
            for root in interior_roots(&candidate.constants, &interval) {
                consider(&book, orders.len(), &root, &mut best);
            }
        }
    }

    match best {
        Some(incumbent) => {
            tracing::debug!(
                "clearing {pair} at rate {} with objective {}",
                incumbent.rate,
                incumbent.objective
            );
            Ok(SolveOutcome::Match(build_settlement(orders, pair, incumbent)?))
        }
        None => Ok(SolveOutcome::NoMatch),
    }
}

struct Incumbent {
    rate: BigRational,
    objective: BigRational,
    fill: FillOutcome,
}

fn consider(
    book: &PairBook,
    order_count: usize,
    rate: &BigRational,
    best: &mut Option<Incumbent>,
) {
    let in_window = match (book.rate_floor(), book.rate_ceiling()) {
        (Some(floor), Some(ceiling)) => rate >= floor && rate <= ceiling,
        _ => false,
    };
    if !in_window {
        tracing::debug!(
            "candidate {rate} rejected: {}",
            RejectReason::RateOutOfBounds
        );
        return;
    }

    let fill = fill_at_rate(book, order_count, rate);
    if let Err(reason) = validate::check(book, &fill, rate) {
        tracing::debug!("candidate {rate} rejected: {reason}");
        return;
    }

    let objective = objective::evaluate(book, &fill, rate);
    let improves = match best {
        None => true,
        Some(incumbent) => {
            objective > incumbent.objective
                || (objective == incumbent.objective && *rate < incumbent.rate)
        }
    };
    if improves {
        *best = Some(Incumbent {
            rate: rate.clone(),
            objective,
            fill,
        });
    }
}

fn build_settlement(
    orders: &[Order],
    pair: &TokenPair,
    incumbent: Incumbent,
) -> Result<Settlement, OrderError> {
    let mut executions = Vec::new();
    for (index, order) in orders.iter().enumerate() {
        let executed = &incumbent.fill.sell_amounts[index];
        if executed.is_zero() {
            continue;
        }
        let side = order.side(pair)?;
        let bought = match side {
            Side::Buy => executed / &incumbent.rate,
            Side::Sell => executed * &incumbent.rate,
        };
        executions.push(Execution {
            order_id: order.id.clone(),
            side,
            sell_amount: Amount::new(executed.clone()),
            buy_amount: Amount::new(bought),
        });
    }

    Ok(Settlement {
        rate: Rate::new(incumbent.rate),
        executions,
        objective: incumbent.objective,
    })
}
