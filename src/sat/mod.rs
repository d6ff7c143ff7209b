//! Weighted boolean satisfiability.
//!
//! Find an assignment satisfying every clause that maximizes the total
//! weight of the terms set to true.

mod io;
mod problem;
mod types;

pub use io::{format_solution, parse_instances};
pub use problem::SatProblem;
pub use types::{Assignment, Clause, Literal, SatInstance, Term};
