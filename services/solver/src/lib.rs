//! Batch-auction matching core
//!
//! Computes, for a finite set of limit orders on a token pair, the uniform
//! clearing rate and per-order executed amounts maximizing the disregarded
//! utility, by analytic enumeration rather than iterative optimization.
//!
//! Pipeline, leaves first: order classification (`book`), rate interval
//! cover and candidate partitions (`matching`), closed-form local optima
//! (`matching::roots`), greedy reconstruction and evaluation
//! (`matching::amounts`, `objective`, `validate`), global argmax (`engine`).
//!
//! **Key invariants:**
//! - A single clearing rate applies to every executed order
//! - Executed sell amounts stay within [0, max_sell]
//! - Orders only execute on the right side of their limit price
//! - Quote-token balance holds exactly: buy-side sold = rate * sell-side sold
//! - All arithmetic is exact rational; no floating point anywhere

pub mod book;
pub mod engine;
pub mod matching;
pub mod objective;
pub mod validate;

pub use engine::{solve, SolveOutcome};
