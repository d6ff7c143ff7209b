//! Jobs, worker reports and the executor seam.

use crate::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// One instance file waiting to be solved.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub path: PathBuf,
    /// Size proxy parsed from the file name.
    pub difficulty: f64,
}

impl Job {
    /// A job for `path`; unparseable names get difficulty 0.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let difficulty = parse_difficulty(&path).unwrap_or(0.0);
        Self { path, difficulty }
    }

    pub fn with_difficulty(path: impl Into<PathBuf>, difficulty: f64) -> Self {
        Self {
            path: path.into(),
            difficulty,
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Parses the size proxy embedded in an instance file name.
///
/// The name (without `.inst.dat`) is split on `_` and the first numeric
/// field wins: `knap_40.inst.dat` is 40, `sat_20_4.3.inst.dat` is 20.
pub fn parse_difficulty(path: &Path) -> Option<f64> {
    let name = path.file_name()?.to_str()?;
    let stem = name
        .strip_suffix(".inst.dat")
        .or_else(|| name.strip_suffix(".dat"))
        .unwrap_or(name);
    stem.split('_')
        .filter_map(|field| field.parse::<f64>().ok())
        .find(|value| value.is_finite())
}

/// Runs one job to completion and returns what it printed.
///
/// Implementations are shared by every worker thread of a batch.
pub trait JobExecutor: Sync {
    fn execute(&self, job: &Job) -> Result<String>;
}

/// How a worker ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerStatus {
    Completed,
    Failed(String),
}

/// The immutable record one worker hands back to the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerReport {
    pub job: Job,
    pub status: WorkerStatus,
    /// Whatever the worker printed; empty for failures.
    pub output: String,
}

impl WorkerReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, WorkerStatus::Failed(_))
    }
}

impl fmt::Display for WorkerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            WorkerStatus::Completed => f.write_str(self.output.trim()),
            WorkerStatus::Failed(reason) => write!(
                f,
                "{} ERROR {}: {}",
                self.job.difficulty,
                self.job.file_name(),
                reason
            ),
        }
    }
}
