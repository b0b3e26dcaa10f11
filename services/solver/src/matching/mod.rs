//! Matching logic module
//!
//! Builds the rate-interval cover, enumerates candidate partitions per
//! interval, solves their closed-form local optima and reconstructs executed
//! amounts at a fixed rate.

pub mod amounts;
pub mod intervals;
pub mod partitions;
pub mod roots;

pub use amounts::fill_at_rate;
pub use intervals::{rate_endpoints, rate_intervals, RateInterval};
pub use partitions::interval_candidates;
pub use roots::interior_roots;
