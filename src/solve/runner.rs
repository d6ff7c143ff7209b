//! Solving every instance of one file.

use super::check::{compare_lines, format_verdict};
use crate::batch::parse_difficulty;
use crate::error::Result;
use crate::knapsack::{self, KnapsackProblem};
use crate::sa::{Annealer, SaConfig, SaProblem, SaResult};
use crate::sat::{self, SatProblem};
use crate::timing::{measure, SystemTimer, TimingSummary};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Which problem an instance file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ProblemKind {
    /// Decide from the file content.
    #[default]
    Auto,
    Knapsack,
    Sat,
}

impl ProblemKind {
    /// Resolves `Auto`: a `p` header line means SAT, anything else knapsack.
    pub fn resolve(self, text: &str) -> ProblemKind {
        match self {
            ProblemKind::Auto => {
                if text.lines().any(|line| line.trim_start().starts_with('p')) {
                    ProblemKind::Sat
                } else {
                    ProblemKind::Knapsack
                }
            }
            kind => kind,
        }
    }
}

/// Options for one solver invocation.
#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    pub problem: ProblemKind,
    /// Record a timing sample per instance and report the summary.
    pub measure: bool,
    /// Compare the solution lines against this expected-result file.
    pub check: Option<PathBuf>,
    /// Base seed; instance `i` of the file uses `seed + i`.
    pub seed: Option<u64>,
}

impl SolveOptions {
    pub fn with_problem(mut self, problem: ProblemKind) -> Self {
        self.problem = problem;
        self
    }

    pub fn with_measure(mut self, measure: bool) -> Self {
        self.measure = measure;
        self
    }

    pub fn with_check(mut self, expected: impl Into<PathBuf>) -> Self {
        self.check = Some(expected.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// What one solver invocation produced.
#[derive(Debug, Clone, Default)]
pub struct FileReport {
    /// One rendered result per instance, in file order.
    pub solutions: Vec<String>,
    /// Present when timing was requested and at least one instance ran.
    pub timing: Option<TimingSummary>,
    /// Instances whose search never reached a feasible state.
    pub infeasible: usize,
}

/// Parses `path` and anneals every instance in it.
pub fn solve_file(path: &Path, options: &SolveOptions) -> Result<FileReport> {
    let text = std::fs::read_to_string(path)?;
    let size = parse_difficulty(path).unwrap_or(0.0);
    solve_text(&text, size, options)
}

/// Anneals every instance in `text`. `size` labels the timing summary.
pub fn solve_text(text: &str, size: f64, options: &SolveOptions) -> Result<FileReport> {
    let mut timer = options.measure.then(SystemTimer::new);
    let kind = options.problem.resolve(text);
    let seed_for = |index: usize| options.seed.map(|seed| seed.wrapping_add(index as u64));
    let mut infeasible = 0;

    let solutions = match kind {
        ProblemKind::Sat => {
            let instances = sat::parse_instances(text)?;
            info!("solving {} weighted SAT instances", instances.len());
            let solutions = instances
                .iter()
                .enumerate()
                .map(|(index, instance)| {
                    let result = anneal(SatProblem::new(instance), seed_for(index), timer.as_mut())?;
                    if !result.feasible {
                        debug!("instance {} ended without a satisfying assignment", instance.id);
                        infeasible += 1;
                    }
                    Ok(sat::format_solution(instance, &result.best, result.feasible))
                })
                .collect::<Result<Vec<_>>>()?;
            if infeasible > 0 {
                warn!(
                    "{infeasible} of {} SAT instances ended without a satisfying assignment; \
                     the search starts with every term false and only moves between \
                     satisfying assignments",
                    instances.len()
                );
            }
            solutions
        }
        ProblemKind::Knapsack | ProblemKind::Auto => {
            let instances = knapsack::parse_instances(text)?;
            info!("solving {} knapsack instances", instances.len());
            instances
                .iter()
                .enumerate()
                .map(|(index, instance)| {
                    let result =
                        anneal(KnapsackProblem::new(instance), seed_for(index), timer.as_mut())?;
                    Ok(knapsack::format_solution(instance, &result.best))
                })
                .collect::<Result<Vec<_>>>()?
        }
    };

    Ok(FileReport {
        solutions,
        timing: timer.and_then(|timer| timer.summary(size)),
        infeasible,
    })
}

fn anneal<P: SaProblem>(
    problem: P,
    seed: Option<u64>,
    timer: Option<&mut SystemTimer>,
) -> Result<SaResult<P::Solution>> {
    let mut config = SaConfig::for_size(problem.size());
    config.seed = seed;
    debug!(
        "annealing {} elements from T0 = {} ({} iterations per level)",
        problem.size(),
        config.initial_temperature,
        config.iterations_per_temperature
    );
    let annealer = Annealer::new(config).bind(problem);
    match timer {
        Some(timer) => measure(timer, || annealer.run())?,
        None => annealer.run(),
    }
}

/// Renders the lines a solver invocation prints.
///
/// With timing, only the summary line; with a check file, the verdict;
/// otherwise the solutions.
pub fn render_report(path: &Path, report: &FileReport, options: &SolveOptions) -> Result<String> {
    if options.measure {
        return Ok(report
            .timing
            .map(|summary| summary.to_string())
            .unwrap_or_default());
    }
    if let Some(expected_path) = &options.check {
        let expected = std::fs::read_to_string(expected_path)?;
        let diffs = compare_lines(&expected, &report.solutions);
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        return Ok(format_verdict(
            parse_difficulty(path).unwrap_or(0.0),
            &name,
            &diffs,
        ));
    }
    Ok(report.solutions.join("\n"))
}
