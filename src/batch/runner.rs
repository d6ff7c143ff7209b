//! Bounded worker pool over a queue of instance files.
//!
//! Jobs are dequeued largest-first. At most `jobs` workers run at once; a
//! finishing worker frees exactly one slot, which is refilled from the
//! queue before the pool waits again. Results are gathered only after the
//! queue is empty and no worker is in flight, then ordered by difficulty.

use super::config::BatchConfig;
use super::executor::ProcessExecutor;
use super::types::{Job, JobExecutor, WorkerReport, WorkerStatus};
use crate::error::Result;
use log::{debug, info, warn};
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

/// Everything a batch produced, ordered by ascending difficulty.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub reports: Vec<WorkerReport>,
}

impl BatchOutcome {
    /// Rendered reports, skipping workers that printed nothing.
    pub fn lines(&self) -> Vec<String> {
        self.reports
            .iter()
            .map(|report| report.to_string())
            .filter(|line| !line.is_empty())
            .collect()
    }

    pub fn failures(&self) -> usize {
        self.reports.iter().filter(|r| r.is_failure()).count()
    }
}

/// Runs one solver invocation per instance file.
pub struct BatchRunner<E> {
    config: BatchConfig,
    executor: E,
}

impl BatchRunner<ProcessExecutor> {
    /// A runner spawning solver processes as described by `config`.
    pub fn with_processes(config: BatchConfig) -> Result<Self> {
        let executor = ProcessExecutor::from_config(&config)?;
        Ok(Self::new(config, executor))
    }
}

impl<E: JobExecutor> BatchRunner<E> {
    pub fn new(config: BatchConfig, executor: E) -> Self {
        Self { config, executor }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Solves every eligible file in the configured directory.
    pub fn run(&self) -> Result<BatchOutcome> {
        self.config.validate()?;
        let jobs = collect_jobs(&self.config.dir, self.config.max_difficulty)?;
        Ok(self.run_jobs(jobs))
    }

    /// Solves `jobs` with at most `config.jobs` workers in flight.
    pub fn run_jobs(&self, jobs: Vec<Job>) -> BatchOutcome {
        let limit = self.config.jobs.max(1);
        let mut queue = schedule(jobs);
        let total = queue.len();
        info!("running {total} jobs on {limit} workers");

        let (tx, rx) = mpsc::channel::<WorkerReport>();
        let mut reports = Vec::with_capacity(total);

        thread::scope(|scope| {
            let mut in_flight = 0usize;
            loop {
                while in_flight < limit {
                    let Some(job) = queue.pop_front() else {
                        break;
                    };
                    debug!("starting {} (difficulty {})", job.file_name(), job.difficulty);
                    let tx = tx.clone();
                    let executor = &self.executor;
                    let _ = scope.spawn(move || {
                        let _ = tx.send(run_worker(executor, job));
                    });
                    in_flight += 1;
                }
                if in_flight == 0 {
                    break;
                }
                match rx.recv() {
                    Ok(report) => {
                        in_flight -= 1;
                        debug!(
                            "finished {} ({} done, {} queued)",
                            report.job.file_name(),
                            reports.len() + 1,
                            queue.len()
                        );
                        reports.push(report);
                    }
                    Err(_) => break,
                }
            }
        });

        sort_reports(&mut reports);
        let outcome = BatchOutcome { reports };
        info!(
            "batch finished: {} jobs, {} failed",
            outcome.reports.len(),
            outcome.failures()
        );
        outcome
    }
}

fn run_worker<E: JobExecutor>(executor: &E, job: Job) -> WorkerReport {
    let result = panic::catch_unwind(AssertUnwindSafe(|| executor.execute(&job)));
    let (status, output) = match result {
        Ok(Ok(output)) => (WorkerStatus::Completed, output),
        Ok(Err(e)) => {
            warn!("{e}");
            (WorkerStatus::Failed(e.to_string()), String::new())
        }
        Err(_) => {
            warn!("worker for {} panicked", job.file_name());
            (WorkerStatus::Failed("worker panicked".to_owned()), String::new())
        }
    };
    WorkerReport {
        job,
        status,
        output,
    }
}

/// Orders jobs by descending difficulty so the largest start first.
pub fn schedule(mut jobs: Vec<Job>) -> VecDeque<Job> {
    jobs.sort_by(|a, b| {
        b.difficulty
            .total_cmp(&a.difficulty)
            .then_with(|| a.path.cmp(&b.path))
    });
    jobs.into()
}

/// Orders reports by ascending difficulty, ties by file path.
pub fn sort_reports(reports: &mut [WorkerReport]) {
    reports.sort_by(|a, b| {
        a.job
            .difficulty
            .total_cmp(&b.job.difficulty)
            .then_with(|| a.job.path.cmp(&b.job.path))
    });
}

/// Lists the regular files of `dir` as jobs, dropping those above `max`.
pub fn collect_jobs(dir: &Path, max: Option<f64>) -> Result<Vec<Job>> {
    let mut jobs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let job = Job::new(path);
        if max.is_some_and(|max| job.difficulty > max) {
            debug!("skipping {} (difficulty {})", job.file_name(), job.difficulty);
            continue;
        }
        jobs.push(job);
    }
    Ok(jobs)
}
