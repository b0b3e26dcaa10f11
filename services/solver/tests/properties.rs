//! Property-based tests over random batches
//!
//! Uses proptest to explore small random order sets and checks the solution
//! invariants, scale invariance, the trivial-execution lower bound and
//! non-improvability against a rate grid.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use solver::book::PairBook;
use solver::matching::amounts::{fill_at_rate, FillOutcome};
use solver::{objective, solve, validate, SolveOutcome};
use types::execution::Settlement;
use types::ids::{OrderId, TokenId, TokenPair};
use types::numeric::{Amount, Rate};
use types::order::Order;

/// (max_sell, limit numerator, limit denominator)
type Spec = (u64, u64, u64);

fn pair() -> TokenPair {
    TokenPair::new(TokenId::from("T1"), TokenId::from("T2"))
}

fn make_orders(buy_specs: &[Spec], sell_specs: &[Spec]) -> Vec<Order> {
    let mut orders = Vec::new();
    for (i, (max_sell, numer, denom)) in buy_specs.iter().enumerate() {
        orders.push(
            Order::new(
                OrderId::new(format!("b{i}")),
                TokenId::from("T1"),
                TokenId::from("T2"),
                Amount::from_integer(*max_sell),
                Rate::from_ratio(*numer, *denom),
            )
            .unwrap(),
        );
    }
    for (i, (max_sell, numer, denom)) in sell_specs.iter().enumerate() {
        orders.push(
            Order::new(
                OrderId::new(format!("s{i}")),
                TokenId::from("T2"),
                TokenId::from("T1"),
                Amount::from_integer(*max_sell),
                Rate::from_ratio(*numer, *denom),
            )
            .unwrap(),
        );
    }
    orders
}

fn scaled_orders(orders: &[Order], factor: u64) -> Vec<Order> {
    orders
        .iter()
        .map(|o| {
            Order::new(
                o.id.clone(),
                o.buy_token.clone(),
                o.sell_token.clone(),
                Amount::new(
                    o.max_sell.as_ratio() * BigRational::from_integer(BigInt::from(factor)),
                ),
                o.limit_price.clone(),
            )
            .unwrap()
        })
        .collect()
}

/// Rebuild a FillOutcome from a settlement so the solver's own post-checks
/// can be replayed against the reported solution.
fn rebuild_fill(orders: &[Order], book: &PairBook, settlement: &Settlement) -> FillOutcome {
    let rate = settlement.rate.as_ratio();
    let mut sell_amounts = vec![BigRational::zero(); orders.len()];
    for (index, order) in orders.iter().enumerate() {
        if let Some(execution) = settlement.execution_for(&order.id) {
            sell_amounts[index] = execution.sell_amount.as_ratio().clone();
        }
    }
    FillOutcome {
        sell_amounts,
        executable_buys: book.executable_buys(rate),
        executable_sells: book.executable_sells(rate),
    }
}

fn spec_strategy() -> impl Strategy<Value = Vec<Spec>> {
    proptest::collection::vec((1u64..=1000, 1u64..=20, 1u64..=20), 1..=4)
}

proptest! {
    #[test]
    fn solutions_satisfy_all_invariants(
        buy_specs in spec_strategy(),
        sell_specs in spec_strategy(),
    ) {
        let orders = make_orders(&buy_specs, &sell_specs);
        let book = PairBook::new(&orders, &pair()).unwrap();

        match solve(&orders, &pair()).unwrap() {
            SolveOutcome::Match(settlement) => {
                let fill = rebuild_fill(&orders, &book, &settlement);
                prop_assert_eq!(
                    validate::check(&book, &fill, settlement.rate.as_ratio()),
                    Ok(())
                );
                // every reported execution carries a positive amount
                for execution in &settlement.executions {
                    prop_assert!(!execution.sell_amount.is_zero());
                }
            }
            SolveOutcome::NoMatch => {
                // with overlapping limits the greedy reconstruction always
                // trades something, so no-match implies no overlap
                prop_assert!(!book.has_overlap());
            }
        }
    }

    #[test]
    fn rate_and_fills_are_scale_invariant(
        buy_specs in spec_strategy(),
        sell_specs in spec_strategy(),
    ) {
        let orders = make_orders(&buy_specs, &sell_specs);
        let scaled = scaled_orders(&orders, 1000);
        let factor = BigRational::from_integer(BigInt::from(1000u64));

        match (
            solve(&orders, &pair()).unwrap(),
            solve(&scaled, &pair()).unwrap(),
        ) {
            (SolveOutcome::Match(base), SolveOutcome::Match(big)) => {
                prop_assert_eq!(&base.rate, &big.rate);
                prop_assert_eq!(&base.objective * &factor, big.objective.clone());
                for execution in &base.executions {
                    let mirrored = big.execution_for(&execution.order_id).unwrap();
                    prop_assert_eq!(
                        execution.sell_amount.as_ratio() * &factor,
                        mirrored.sell_amount.as_ratio().clone()
                    );
                }
            }
            (SolveOutcome::NoMatch, SolveOutcome::NoMatch) => {}
            _ => prop_assert!(false, "scaling changed matchability"),
        }
    }

    #[test]
    fn objective_beats_trivial_single_pair_execution(
        buy_specs in spec_strategy(),
        sell_specs in spec_strategy(),
    ) {
        let orders = make_orders(&buy_specs, &sell_specs);
        let book = PairBook::new(&orders, &pair()).unwrap();
        prop_assume!(book.has_overlap());

        let settlement = match solve(&orders, &pair()).unwrap() {
            SolveOutcome::Match(settlement) => settlement,
            SolveOutcome::NoMatch => return Err(TestCaseError::fail("overlap but no match")),
        };

        // execute only the most generous buy against the most aggressive
        // executable sell, at the buy's limit rate
        let rate = book.rate_ceiling().unwrap().clone();
        let buy = &book.buys[0];
        let sell = &book.sells[0];
        let buy_amount = buy.max_sell.clone().min(&sell.max_sell * &rate);
        let mut sell_amounts = vec![BigRational::zero(); orders.len()];
        sell_amounts[buy.index] = buy_amount.clone();
        sell_amounts[sell.index] = buy_amount / &rate;
        let trivial = FillOutcome {
            sell_amounts,
            executable_buys: book.executable_buys(&rate),
            executable_sells: book.executable_sells(&rate),
        };

        let trivial_objective = objective::evaluate(&book, &trivial, &rate);
        prop_assert!(settlement.objective >= trivial_objective);
    }

    #[test]
    fn objective_is_maximal_on_a_rate_grid(
        buy_specs in spec_strategy(),
        sell_specs in spec_strategy(),
    ) {
        let orders = make_orders(&buy_specs, &sell_specs);
        let book = PairBook::new(&orders, &pair()).unwrap();
        prop_assume!(book.has_overlap());

        let settlement = match solve(&orders, &pair()).unwrap() {
            SolveOutcome::Match(settlement) => settlement,
            SolveOutcome::NoMatch => return Err(TestCaseError::fail("overlap but no match")),
        };

        let floor = book.rate_floor().unwrap().clone();
        let ceiling = book.rate_ceiling().unwrap().clone();
        let steps = 29u64;
        let width = &ceiling - &floor;
        for k in 0..=steps {
            let rate = &floor
                + &width * BigRational::new(BigInt::from(k), BigInt::from(steps));
            let fill = fill_at_rate(&book, orders.len(), &rate);
            let objective = objective::evaluate(&book, &fill, &rate);
            prop_assert!(
                objective <= settlement.objective,
                "rate {} attains {} above the reported optimum {}",
                rate,
                objective,
                settlement.objective
            );
        }
    }
}
