//! Simulated annealing for 0/1 knapsack and weighted SAT.
//!
//! - **Simulated Annealing (SA)**: a generic engine over any
//!   [`sa::SaProblem`], with geometric cooling and Metropolis acceptance
//!   restricted to feasible neighbors.
//! - **Knapsack** and **weighted SAT**: the two problem domains, each with
//!   an instance parser, an incrementally maintained candidate state and
//!   a result-line formatter.
//! - **Timing**: begin/finish instrumentation with average, minimum and
//!   maximum over repeated runs.
//! - **Batch**: a bounded pool of solver processes over a directory of
//!   instance files with difficulty-ordered output.
//!
//! # Architecture
//!
//! `batch` spawns one `annealer solve` process per file; `solve` parses
//! the file and hands each instance to `sa` through the matching domain
//! binding, optionally wrapped in a `timing` measurement.

pub mod batch;
pub mod error;
pub mod knapsack;
pub mod sa;
pub mod sat;
pub mod solve;
pub mod timing;

pub use error::{Error, Result};
