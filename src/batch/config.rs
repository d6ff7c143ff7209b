//! Batch configuration.

use super::types::parse_difficulty;
use crate::error::{Error, Result};
use crate::solve::ProblemKind;
use std::path::{Path, PathBuf};

/// Configuration for a batch over a directory of instance files.
///
/// # Examples
///
/// ```
/// use annealer::batch::BatchConfig;
///
/// let config = BatchConfig::new("instances")
///     .with_jobs(4)
///     .with_max_difficulty(40.0)
///     .with_measure(true);
/// assert_eq!(config.jobs, 4);
/// ```
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory holding the instance files.
    pub dir: PathBuf,

    /// Maximum number of workers running at once.
    pub jobs: usize,

    /// Files whose difficulty exceeds this are skipped.
    pub max_difficulty: Option<f64>,

    /// Directory with expected results; enables correctness checking.
    pub check_dir: Option<PathBuf>,

    /// Report per-file timing summaries instead of solutions.
    ///
    /// Takes precedence over `check_dir`.
    pub measure: bool,

    pub problem: ProblemKind,

    /// Solver executable; defaults to the running binary.
    pub program: Option<PathBuf>,
}

impl BatchConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            jobs: default_jobs(),
            max_difficulty: None,
            check_dir: None,
            measure: false,
            problem: ProblemKind::Auto,
            program: None,
        }
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_max_difficulty(mut self, max: f64) -> Self {
        self.max_difficulty = Some(max);
        self
    }

    pub fn with_check_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.check_dir = Some(dir.into());
        self
    }

    pub fn with_measure(mut self, measure: bool) -> Self {
        self.measure = measure;
        self
    }

    pub fn with_problem(mut self, problem: ProblemKind) -> Self {
        self.problem = problem;
        self
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.jobs == 0 {
            return Err(Error::config("jobs must be positive"));
        }
        if !self.dir.is_dir() {
            return Err(Error::config(format!(
                "instance directory {} does not exist",
                self.dir.display()
            )));
        }
        if let Some(dir) = &self.check_dir {
            if !dir.is_dir() {
                return Err(Error::config(format!(
                    "expected-results directory {} does not exist",
                    dir.display()
                )));
            }
        }
        if self.max_difficulty.is_some_and(f64::is_nan) {
            return Err(Error::config("max difficulty must be a number"));
        }
        Ok(())
    }

    /// Expected-result file for `instance`, inside `check_dir`.
    ///
    /// The same name with `.inst.dat` replaced by `.sol.dat`. When no such
    /// file exists, `sat.<difficulty>.sol.dat` is used if present.
    pub fn expected_path(&self, instance: &Path) -> Option<PathBuf> {
        let dir = self.check_dir.as_ref()?;
        let name = instance.file_name()?.to_string_lossy();
        let name = match name.strip_suffix(".inst.dat") {
            Some(stem) => format!("{stem}.sol.dat"),
            None => name.into_owned(),
        };
        let mapped = dir.join(name);
        if mapped.exists() {
            return Some(mapped);
        }
        let by_difficulty = parse_difficulty(instance)
            .map(|difficulty| dir.join(format!("sat.{difficulty}.sol.dat")))
            .filter(|path| path.exists());
        Some(by_difficulty.unwrap_or(mapped))
    }
}

/// Number of available processing units, at least one.
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_jobs_positive() {
        assert!(BatchConfig::new(".").jobs >= 1);
    }

    #[test]
    fn test_validate_ok() {
        assert!(BatchConfig::new(".").validate().is_ok());
    }

    #[test]
    fn test_validate_zero_jobs() {
        let config = BatchConfig::new(".").with_jobs(0);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_missing_dirs() {
        assert!(BatchConfig::new("./no/such/dir").validate().is_err());
        let config = BatchConfig::new(".").with_check_dir("./no/such/dir");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_nan_difficulty() {
        let config = BatchConfig::new(".").with_max_difficulty(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_expected_path() {
        let config = BatchConfig::new(".").with_check_dir("sol");
        assert_eq!(
            config.expected_path(Path::new("inst/knap_40.inst.dat")),
            Some(PathBuf::from("sol/knap_40.sol.dat"))
        );
        assert_eq!(
            config.expected_path(Path::new("inst/sat_20.cnf")),
            Some(PathBuf::from("sol/sat_20.cnf"))
        );
        assert_eq!(BatchConfig::new(".").expected_path(Path::new("a")), None);
    }

    #[test]
    fn test_expected_path_falls_back_to_difficulty_name() {
        let dir = std::env::temp_dir().join(format!("annealer_expected_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("sat.20.sol.dat"), "1 1\n").unwrap();
        std::fs::write(dir.join("sat_30.sol.dat"), "1 1\n").unwrap();
        let config = BatchConfig::new(".").with_check_dir(&dir);

        assert_eq!(
            config.expected_path(Path::new("inst/sat_20.inst.dat")),
            Some(dir.join("sat.20.sol.dat"))
        );
        // The mapped name wins when both exist.
        std::fs::write(dir.join("sat.30.sol.dat"), "1 1\n").unwrap();
        assert_eq!(
            config.expected_path(Path::new("inst/sat_30.inst.dat")),
            Some(dir.join("sat_30.sol.dat"))
        );
        // Neither exists: the mapped name is reported.
        assert_eq!(
            config.expected_path(Path::new("inst/sat_40.inst.dat")),
            Some(dir.join("sat_40.sol.dat"))
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
