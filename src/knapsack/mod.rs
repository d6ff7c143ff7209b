//! 0/1 knapsack.
//!
//! Select a subset of items maximizing total price while the total
//! weight stays within the instance capacity.

mod io;
mod problem;
mod types;

pub use io::{format_solution, parse_instances, parse_line};
pub use problem::KnapsackProblem;
pub use types::{Item, KnapsackInstance, Selection};
