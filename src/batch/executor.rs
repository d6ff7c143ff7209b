//! Worker processes.

use super::config::BatchConfig;
use super::types::{Job, JobExecutor};
use crate::error::{Error, Result};
use clap::ValueEnum;
use log::debug;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Solves each job in a separate `<program> solve` process.
///
/// The child's stdout is the job's result; its stderr is passed through.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    program: PathBuf,
    config: BatchConfig,
}

impl ProcessExecutor {
    /// Builds an executor for `config`, defaulting to the running binary.
    pub fn from_config(config: &BatchConfig) -> Result<Self> {
        let program = match &config.program {
            Some(program) => program.clone(),
            None => std::env::current_exe()?,
        };
        Ok(Self {
            program,
            config: config.clone(),
        })
    }

    /// The command line that solves `job`.
    pub fn command(&self, job: &Job) -> Command {
        let mut command = Command::new(&self.program);
        let _ = command.arg("solve").arg("--filepath").arg(&job.path);
        if let Some(value) = self.config.problem.to_possible_value() {
            let _ = command.arg("--problem").arg(value.get_name());
        }
        if self.config.measure {
            let _ = command.arg("--measure");
        } else if let Some(expected) = self.config.expected_path(&job.path) {
            let _ = command.arg("--test").arg(expected);
        }
        command
    }
}

impl JobExecutor for ProcessExecutor {
    fn execute(&self, job: &Job) -> Result<String> {
        let mut command = self.command(job);
        debug!("spawning {command:?}");
        let output = command
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()?;
        if !output.status.success() {
            return Err(Error::Worker {
                file: job.file_name(),
                reason: output.status.to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
