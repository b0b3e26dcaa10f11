//! Closed-form local optima of one candidate partition
//!
//! On a fixed interval with a fixed partition the objective is smooth, so its
//! interior optimum is a stationary point of the constrained first-order
//! system. Three consistent fill-class assignments of the two pivots remain
//! once boundary rates are accounted for (those coincide with interval
//! endpoints, which are evaluated separately): sell pivot partial, buy pivot
//! partial, both pivots filled. Each assignment yields one candidate rate in
//! closed form. A vanishing denominator or negative radicand means the
//! stationary point does not exist and the root is discarded, as is any root
//! outside the open interval.

use crate::matching::intervals::RateInterval;
use crate::matching::partitions::PartitionConstants;
use num_bigint::BigInt;
use num_integer::Roots;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

fn int(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

/// Rate at which the buy side (pivot included) is fully filled and the sell
/// pivot absorbs the balance partially
pub fn sell_pivot_partial_rate(k: &PartitionConstants) -> Option<BigRational> {
    let numer = int(4) * (&k.buy_cap + &k.buy_filled);
    let denom = &k.sell_limit
        * (&k.constant_term + int(3) * &k.buy_cap + int(2) * &k.buy_filled)
        + &k.sell_cap
        + int(2) * &k.sell_filled;
    if denom.is_zero() {
        return None;
    }
    Some(numer / denom)
}

/// Rate at which the sell side (pivot included) is fully filled and the buy
/// pivot absorbs the balance partially
pub fn buy_pivot_partial_rate(k: &PartitionConstants) -> Option<BigRational> {
    let denom = int(2) * &k.sell_limit * (&k.sell_cap + &k.sell_filled);
    if denom.is_zero() {
        return None;
    }
    let numer = &k.buy_limit
        * (&k.sell_limit * (&k.buy_cap + int(2) * &k.buy_filled - &k.constant_term)
            + &k.sell_cap);
    let radicand = numer / denom;
    if radicand.is_negative() {
        return None;
    }
    Some(rational_sqrt(&radicand))
}

/// Rate at which both pivots (and with them both executable prefixes) are
/// fully filled: the balance ratio of the two sides' capacities
pub fn all_filled_rate(k: &PartitionConstants) -> Option<BigRational> {
    let denom = &k.sell_cap + &k.sell_filled;
    if denom.is_zero() {
        return None;
    }
    Some((&k.buy_cap + &k.buy_filled) / denom)
}

/// All existing roots of one candidate strictly inside the interval,
/// ascending and deduplicated
pub fn interior_roots(k: &PartitionConstants, interval: &RateInterval) -> Vec<BigRational> {
    let mut roots: Vec<BigRational> = [
        sell_pivot_partial_rate(k),
        buy_pivot_partial_rate(k),
        all_filled_rate(k),
    ]
    .into_iter()
    .flatten()
    .filter(|rate| *rate > interval.lower && *rate < interval.upper)
    .collect();

    roots.sort();
    roots.dedup();
    roots
}

/// Square root of a non-negative rational
///
/// Exact when numerator and denominator are perfect squares; otherwise a
/// deterministic approximation with denominator 10^18 (floor of the scaled
/// integer square root). An approximated root only ever serves as a
/// candidate rate, so the error cannot violate an invariant.
pub fn rational_sqrt(value: &BigRational) -> BigRational {
    let numer_sqrt = value.numer().sqrt();
    let denom_sqrt = value.denom().sqrt();
    if &(&numer_sqrt * &numer_sqrt) == value.numer()
        && &(&denom_sqrt * &denom_sqrt) == value.denom()
    {
        return BigRational::new(numer_sqrt, denom_sqrt);
    }

    let scale = num_traits::pow(BigInt::from(10u8), 18);
    let scaled = (value.numer() * &scale * &scale) / value.denom();
    BigRational::new(scaled.sqrt(), scale)
}
