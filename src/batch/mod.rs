//! Batch execution over a directory of instance files.
//!
//! Each file is solved by an isolated worker process. The pool bounds how
//! many run at once, front-loads the largest files, and emits results in
//! ascending difficulty order no matter which worker finishes first.

mod config;
mod executor;
mod runner;
mod types;

pub use config::{default_jobs, BatchConfig};
pub use executor::ProcessExecutor;
pub use runner::{collect_jobs, schedule, sort_reports, BatchOutcome, BatchRunner};
pub use types::{parse_difficulty, Job, JobExecutor, WorkerReport, WorkerStatus};
