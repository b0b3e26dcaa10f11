//! Candidate partition enumeration per rate interval
//!
//! Within one interval the executable sets B', S' are fixed prefixes of the
//! two sides. At an interval-local optimum at least one side is (up to its
//! pivot order) fully filled, so it suffices to slide a pivot over the other
//! side: orders above the pivot are filled, orders below are unfilled and the
//! pivot's own fill class is decided by the root forms. Pivots whose implied
//! executed amounts cannot balance anywhere in the interval are pruned; the
//! pruning window is a relaxation, so no feasible optimum is lost.

use crate::book::PairBook;
use crate::matching::intervals::RateInterval;
use num_rational::BigRational;

/// Partition constants feeding the closed-form roots
///
/// `filled` sums exclude the pivot order itself. `constant_term` is the fixed
/// contribution of the non-pivot orders to the stationarity condition:
/// (filled - unfilled) buy capacity minus limit-weighted filled sell capacity
/// plus limit-weighted unfilled sell capacity.
#[derive(Debug, Clone)]
pub struct PartitionConstants {
    pub buy_limit: BigRational,
    pub buy_cap: BigRational,
    pub buy_filled: BigRational,
    pub sell_limit: BigRational,
    pub sell_cap: BigRational,
    pub sell_filled: BigRational,
    pub constant_term: BigRational,
}

/// One candidate partition: pivot positions into the executable prefixes
/// plus the precomputed constants
#[derive(Debug, Clone)]
pub struct Candidate {
    pub buy_pivot: usize,
    pub sell_pivot: usize,
    pub constants: PartitionConstants,
}

/// Enumerate the candidate partitions of one interval
///
/// Returns at most |B'| + |S'| candidates; each is O(1) to build thanks to
/// the book's prefix sums.
pub fn interval_candidates(book: &PairBook, interval: &RateInterval) -> Vec<Candidate> {
    let nb = book.executable_buys(&interval.upper);
    let ns = book.executable_sells(&interval.lower);
    if nb == 0 || ns == 0 {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    let mut corner_done = false;

    // Sell side filled up to its pivot (the least aggressive executable
    // sell); the buy pivot slides. The executed buy amount must equal
    // rate * executed sell amount for some rate in the interval.
    {
        let sp = ns - 1;
        let sell_hi = book.sell_cap_prefix(ns);
        let sell_lo = book.sell_cap_prefix(sp);
        let window_lo = sell_lo * &interval.lower;
        let window_hi = sell_hi * &interval.upper;

        for bp in 0..nb {
            if *book.buy_cap_prefix(bp) > window_hi {
                break;
            }
            if *book.buy_cap_prefix(bp + 1) >= window_lo {
                candidates.push(make_candidate(book, nb, ns, bp, sp));
                corner_done |= bp == nb - 1;
            }
        }
    }

    // Buy side filled up to its pivot; the sell pivot slides.
    {
        let bp = nb - 1;
        let buy_hi = book.buy_cap_prefix(nb);
        let buy_lo = book.buy_cap_prefix(bp);
        let window_lo = buy_lo / &interval.upper;
        let window_hi = buy_hi / &interval.lower;

        for sp in 0..ns {
            if sp == ns - 1 && corner_done {
                continue;
            }
            if *book.sell_cap_prefix(sp) > window_hi {
                break;
            }
            if *book.sell_cap_prefix(sp + 1) >= window_lo {
                candidates.push(make_candidate(book, nb, ns, bp, sp));
            }
        }
    }

    candidates
}

fn make_candidate(book: &PairBook, nb: usize, ns: usize, bp: usize, sp: usize) -> Candidate {
    let buy = &book.buys[bp];
    let sell = &book.sells[sp];

    let buy_filled = book.buy_cap_prefix(bp).clone();
    let buy_unfilled = book.buy_cap_prefix(nb) - book.buy_cap_prefix(bp + 1);
    let sell_filled = book.sell_cap_prefix(sp).clone();
    let sell_filled_weighted = book.sell_weighted_prefix(sp);
    let sell_unfilled_weighted = book.sell_weighted_prefix(ns) - book.sell_weighted_prefix(sp + 1);

    let constant_term =
        &buy_filled - buy_unfilled - sell_filled_weighted + sell_unfilled_weighted;

    Candidate {
        buy_pivot: bp,
        sell_pivot: sp,
        constants: PartitionConstants {
            buy_limit: buy.limit.clone(),
            buy_cap: buy.max_sell.clone(),
            buy_filled,
            sell_limit: sell.limit.clone(),
            sell_cap: sell.max_sell.clone(),
            sell_filled,
            constant_term,
        },
    }
}
