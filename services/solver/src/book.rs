//! Order classification for a single token pair
//!
//! Splits a batch into the two sides of the pair, sorts each side by fill
//! priority and precomputes the rolling prefix sums that make every candidate
//! partition's constants O(1).

use num_rational::BigRational;
use num_traits::{One, Zero};
use types::errors::OrderError;
use types::ids::TokenPair;
use types::order::{Order, Side};

/// One side's view of an order, reduced to what the kernel needs
#[derive(Debug, Clone)]
pub struct BookOrder {
    /// Position in the caller's order slice
    pub index: usize,
    /// Limit price in the order's own sell-per-buy units
    pub limit: BigRational,
    /// Executable rate bound: buys execute at rate <= bound, sells at
    /// rate >= bound (bound is the limit for buys, its reciprocal for sells)
    pub bound: BigRational,
    /// Maximum sell amount
    pub max_sell: BigRational,
}

/// Classified, priority-sorted order book for one pair
///
/// Buys are sorted by descending bound, sells by ascending bound, so for any
/// rate the executable set on each side is a prefix, and the prefix order is
/// exactly the fill priority (higher limit price fills first).
#[derive(Debug)]
pub struct PairBook {
    pub buys: Vec<BookOrder>,
    pub sells: Vec<BookOrder>,
    buy_caps: Vec<BigRational>,
    sell_caps: Vec<BigRational>,
    sell_weighted_caps: Vec<BigRational>,
}

impl PairBook {
    /// Classify and sort a batch of orders against a pair
    ///
    /// Fails on the first order whose tokens do not form the pair; validated
    /// order records carry positive amounts and prices already.
    pub fn new(orders: &[Order], pair: &TokenPair) -> Result<Self, OrderError> {
        let mut buys = Vec::new();
        let mut sells = Vec::new();

        for (index, order) in orders.iter().enumerate() {
            let limit = order.limit_price.as_ratio().clone();
            let max_sell = order.max_sell.as_ratio().clone();
            match order.side(pair)? {
                Side::Buy => buys.push(BookOrder {
                    index,
                    bound: limit.clone(),
                    limit,
                    max_sell,
                }),
                Side::Sell => sells.push(BookOrder {
                    index,
                    bound: BigRational::one() / &limit,
                    limit,
                    max_sell,
                }),
            }
        }

        // Fill priority with a deterministic tie-break on input position.
        buys.sort_by(|x, y| y.bound.cmp(&x.bound).then(x.index.cmp(&y.index)));
        sells.sort_by(|x, y| x.bound.cmp(&y.bound).then(x.index.cmp(&y.index)));

        let buy_caps = prefix_sums(&buys, |o| o.max_sell.clone());
        let sell_caps = prefix_sums(&sells, |o| o.max_sell.clone());
        let sell_weighted_caps = prefix_sums(&sells, |o| &o.max_sell / &o.limit);

        Ok(Self {
            buys,
            sells,
            buy_caps,
            sell_caps,
            sell_weighted_caps,
        })
    }

    /// Lowest rate any sell order accepts, if there are sells
    pub fn rate_floor(&self) -> Option<&BigRational> {
        self.sells.first().map(|o| &o.bound)
    }

    /// Highest rate any buy order accepts, if there are buys
    pub fn rate_ceiling(&self) -> Option<&BigRational> {
        self.buys.first().map(|o| &o.bound)
    }

    /// Whether the two sides' limit prices overlap at all
    pub fn has_overlap(&self) -> bool {
        match (self.rate_floor(), self.rate_ceiling()) {
            (Some(floor), Some(ceiling)) => floor <= ceiling,
            _ => false,
        }
    }

    /// Number of buys executable at `rate` (a prefix of `buys`)
    pub fn executable_buys(&self, rate: &BigRational) -> usize {
        self.buys.partition_point(|o| o.bound >= *rate)
    }

    /// Number of sells executable at `rate` (a prefix of `sells`)
    pub fn executable_sells(&self, rate: &BigRational) -> usize {
        self.sells.partition_point(|o| o.bound <= *rate)
    }

    /// Sum of max-sell over the first `n` buys
    pub fn buy_cap_prefix(&self, n: usize) -> &BigRational {
        &self.buy_caps[n]
    }

    /// Sum of max-sell over the first `n` sells
    pub fn sell_cap_prefix(&self, n: usize) -> &BigRational {
        &self.sell_caps[n]
    }

    /// Sum of max-sell / limit over the first `n` sells
    pub fn sell_weighted_prefix(&self, n: usize) -> &BigRational {
        &self.sell_weighted_caps[n]
    }
}

fn prefix_sums<F>(orders: &[BookOrder], mut value: F) -> Vec<BigRational>
where
    F: FnMut(&BookOrder) -> BigRational,
{
    let mut sums = Vec::with_capacity(orders.len() + 1);
    let mut acc = BigRational::zero();
    sums.push(acc.clone());
    for order in orders {
        acc += value(order);
        sums.push(acc.clone());
    }
    sums
}
