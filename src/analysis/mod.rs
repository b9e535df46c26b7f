//! Post-match trace analysis.

pub mod stats;

pub use stats::{TraceStats, two_sided_binomial_p};
