//! One solver invocation: parse a file, anneal each instance, report.

mod check;
mod runner;

pub use check::{compare_lines, format_verdict, LineDiff};
pub use runner::{render_report, solve_file, solve_text, FileReport, ProblemKind, SolveOptions};
