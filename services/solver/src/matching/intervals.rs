//! Rate-interval cover generation
//!
//! The objective is piecewise smooth in the clearing rate; the pieces are
//! delimited by the orders' rate bounds. This module produces the sorted,
//! deduplicated endpoint set restricted to the overlap window and the
//! non-degenerate intervals between consecutive endpoints.

use crate::book::PairBook;
use num_rational::BigRational;

/// Closed candidate rate interval with distinct endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateInterval {
    pub lower: BigRational,
    pub upper: BigRational,
}

/// All order rate bounds inside the overlap window, ascending and deduplicated
///
/// The overlap window's own endpoints are bounds of the least demanding sell
/// and the most generous buy, so they always appear in the result. Every
/// element is a candidate clearing rate in its own right.
pub fn rate_endpoints(book: &PairBook) -> Vec<BigRational> {
    let (floor, ceiling) = match (book.rate_floor(), book.rate_ceiling()) {
        (Some(floor), Some(ceiling)) if floor <= ceiling => (floor, ceiling),
        _ => return Vec::new(),
    };

    let mut endpoints: Vec<BigRational> = book
        .buys
        .iter()
        .chain(book.sells.iter())
        .map(|o| o.bound.clone())
        .filter(|bound| bound >= floor && bound <= ceiling)
        .collect();

    endpoints.sort();
    endpoints.dedup();
    endpoints
}

/// Non-degenerate intervals between consecutive endpoints
pub fn rate_intervals(endpoints: &[BigRational]) -> impl Iterator<Item = RateInterval> + '_ {
    endpoints.windows(2).filter_map(|pair| {
        if pair[0] < pair[1] {
            Some(RateInterval {
                lower: pair[0].clone(),
                upper: pair[1].clone(),
            })
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::{OrderId, TokenId, TokenPair};
    use types::numeric::{Amount, Rate};
    use types::order::Order;

    fn pair() -> TokenPair {
        TokenPair::new(TokenId::from("T1"), TokenId::from("T2"))
    }

    fn order(id: &str, buy: &str, sell: &str, limit: (u64, u64)) -> Order {
        Order::new(
            OrderId::from(id),
            TokenId::from(buy),
            TokenId::from(sell),
            Amount::from_integer(1),
            Rate::from_ratio(limit.0, limit.1),
        )
        .unwrap()
    }

    fn ratio(n: i64, d: i64) -> BigRational {
        BigRational::new(n.into(), d.into())
    }

    #[test]
    fn test_endpoints_sorted_dedup() {
        let orders = vec![
            order("b1", "T1", "T2", (2, 1)),
            order("b2", "T1", "T2", (5, 2)),
            order("s1", "T2", "T1", (3, 1)), // bound 1/3
            order("s2", "T2", "T1", (2, 1)), // bound 1/2
        ];
        let book = PairBook::new(&orders, &pair()).unwrap();
        let endpoints = rate_endpoints(&book);
        assert_eq!(
            endpoints,
            vec![ratio(1, 3), ratio(1, 2), ratio(2, 1), ratio(5, 2)]
        );
    }

    #[test]
    fn test_out_of_window_bounds_dropped() {
        let orders = vec![
            order("b1", "T1", "T2", (2, 1)),
            order("b2", "T1", "T2", (1, 10)), // bound 1/10, below the floor
            order("s1", "T2", "T1", (2, 1)),  // bound 1/2, the floor
        ];
        let book = PairBook::new(&orders, &pair()).unwrap();
        assert_eq!(rate_endpoints(&book), vec![ratio(1, 2), ratio(2, 1)]);
    }

    #[test]
    fn test_degenerate_window_single_endpoint() {
        let orders = vec![
            order("b1", "T1", "T2", (1, 1)),
            order("s1", "T2", "T1", (1, 1)),
        ];
        let book = PairBook::new(&orders, &pair()).unwrap();
        let endpoints = rate_endpoints(&book);
        assert_eq!(endpoints, vec![ratio(1, 1)]);
        assert_eq!(rate_intervals(&endpoints).count(), 0);
    }

    #[test]
    fn test_no_overlap_empty() {
        let orders = vec![
            order("b1", "T1", "T2", (1, 2)), // ceiling 1/2
            order("s1", "T2", "T1", (1, 1)), // floor 1
        ];
        let book = PairBook::new(&orders, &pair()).unwrap();
        assert!(rate_endpoints(&book).is_empty());
    }

    #[test]
    fn test_intervals_are_consecutive() {
        let endpoints = vec![ratio(1, 3), ratio(1, 2), ratio(2, 1)];
        let intervals: Vec<_> = rate_intervals(&endpoints).collect();
        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].lower, ratio(1, 3));
        assert_eq!(intervals[0].upper, ratio(1, 2));
        assert_eq!(intervals[1].lower, ratio(1, 2));
        assert_eq!(intervals[1].upper, ratio(2, 1));
    }
}
