//! Timing instrumentation.
//!
//! Purely observational: wrapping an engine run in a [`Timer`] never
//! changes its outcome.

mod timer;

pub use timer::{measure, SystemTimer, Timer, TimingSummary};
