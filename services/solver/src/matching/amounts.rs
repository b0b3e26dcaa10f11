//! Executed-amount reconstruction at a fixed clearing rate
//!
//! Greedy two-pointer walk over the executable prefixes in fill-priority
//! order. Each step matches the smaller of the two heads' remaining
//! quote-token capacity, so the quote balance (buy-side sold equals rate
//! times sell-side sold) holds exactly by construction, one side ends fully
//! filled and at most one order ends partial.

use crate::book::PairBook;
use num_rational::BigRational;
use num_traits::Zero;

/// Reconstructed execution at one candidate rate
#[derive(Debug, Clone)]
pub struct FillOutcome {
    /// Executed sell amount per order, indexed like the caller's order slice
    pub sell_amounts: Vec<BigRational>,
    /// Number of buys executable at the rate (prefix of the book's buys)
    pub executable_buys: usize,
    /// Number of sells executable at the rate (prefix of the book's sells)
    pub executable_sells: usize,
}

impl FillOutcome {
    /// Whether any order traded at all
    pub fn is_empty(&self) -> bool {
        self.sell_amounts.iter().all(|y| y.is_zero())
    }
}

/// Compute the optimal executed sell amounts for a fixed rate
///
/// `order_count` is the length of the original order slice the book was
/// built from; untouched orders keep a zero amount.
pub fn fill_at_rate(book: &PairBook, order_count: usize, rate: &BigRational) -> FillOutcome {
    let executable_buys = book.executable_buys(rate);
    let executable_sells = book.executable_sells(rate);
    let mut sell_amounts = vec![BigRational::zero(); order_count];

    let mut bi = 0;
    let mut si = 0;
    // Remaining quote-token capacity of the two heads.
    let mut buy_remaining = BigRational::zero();
    let mut sell_remaining = BigRational::zero();
    if bi < executable_buys {
        buy_remaining = book.buys[bi].max_sell.clone();
    }
    if si < executable_sells {
        sell_remaining = &book.sells[si].max_sell * rate;
    }

    while bi < executable_buys && si < executable_sells {
        let step = buy_remaining.clone().min(sell_remaining.clone());

        sell_amounts[book.buys[bi].index] += &step;
        sell_amounts[book.sells[si].index] += &step / rate;
        buy_remaining -= &step;
        sell_remaining -= &step;

        if buy_remaining.is_zero() {
            bi += 1;
            if bi < executable_buys {
                buy_remaining = book.buys[bi].max_sell.clone();
            }
        }
        if sell_remaining.is_zero() {
            si += 1;
            if si < executable_sells {
                sell_remaining = &book.sells[si].max_sell * rate;
            }
        }
    }

    FillOutcome {
        sell_amounts,
        executable_buys,
        executable_sells,
    }
}
