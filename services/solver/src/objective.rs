//! Disregarded-utility objective
//!
//! Each executed order contributes twice its realized utility minus the
//! utility it would realize if fully filled at the clearing rate; orders the
//! rate excludes contribute nothing. Utility is measured against the order's
//! limit price, so the objective favors executing orders whose limit is far
//! from the clearing rate and penalizes leaving such orders unfilled.

use crate::book::PairBook;
use crate::matching::amounts::FillOutcome;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use types::order::Side;

/// Objective contribution of a single executable order
///
/// For a buy with limit pi: (2y - y_max)(pi - r) / (pi * r).
/// For a sell with limit pi: (2y - y_max)(pi * r - 1) / (pi * r).
/// Both vanish when the order trades exactly at its limit and go negative
/// when an attractive order is left mostly unfilled.
pub fn order_term(
    side: Side,
    limit: &BigRational,
    executed: &BigRational,
    max_sell: &BigRational,
    rate: &BigRational,
) -> BigRational {
    let two = BigRational::from_integer(BigInt::from(2));
    let margin = match side {
        Side::Buy => limit - rate,
        Side::Sell => limit * rate - BigRational::one(),
    };
    (two * executed - max_sell) * margin / (limit * rate)
}

/// Total objective of a reconstructed execution
pub fn evaluate(book: &PairBook, fill: &FillOutcome, rate: &BigRational) -> BigRational {
    let buys = book.buys[..fill.executable_buys]
        .iter()
        .map(|o| order_term(Side::Buy, &o.limit, &fill.sell_amounts[o.index], &o.max_sell, rate));
    let sells = book.sells[..fill.executable_sells]
        .iter()
        .map(|o| order_term(Side::Sell, &o.limit, &fill.sell_amounts[o.index], &o.max_sell, rate));
    buys.chain(sells).sum()
}
