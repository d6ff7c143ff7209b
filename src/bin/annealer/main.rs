use std::io::Write;
use std::path::PathBuf;

use annealer::batch::{BatchConfig, BatchRunner};
use annealer::solve::{render_report, solve_file, ProblemKind, SolveOptions};
use annealer::Result;
use clap::{Parser, Subcommand};
use log::{error, info, warn, LevelFilter};

#[derive(Debug, Parser)]
#[command(author, version, about, arg_required_else_help = true)]
struct Args {
    /// Log debug information to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve every instance in one file and print one result per instance.
    Solve {
        /// Path to the file with instances.
        #[arg(short = 'f', long = "filepath")]
        file: PathBuf,

        /// Problem held by the file.
        #[arg(long, value_enum, default_value_t)]
        problem: ProblemKind,

        /// Print `<size> <avg> <min> <max>` timing (seconds) instead of results.
        #[arg(short, long)]
        measure: bool,

        /// Compare results with this expected-results file and print a verdict.
        #[arg(short = 't', long = "test")]
        test: Option<PathBuf>,

        /// Base seed for reproducible runs.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Solve every file in a directory on a bounded pool of worker processes.
    Batch {
        /// Directory with instance files.
        #[arg(short = 'i', long = "instances")]
        instances: PathBuf,

        /// Number of parallel jobs [default: available processing units].
        #[arg(short = 'j', long)]
        jobs: Option<usize>,

        /// Skip files whose difficulty exceeds this value.
        #[arg(short = 'd', long)]
        difficulty: Option<f64>,

        /// Directory with expected results; turns correctness testing on.
        #[arg(short = 't', long = "test")]
        test: Option<PathBuf>,

        /// Report per-file timing instead of results.
        #[arg(short, long)]
        measure: bool,

        /// Problem held by the files.
        #[arg(long, value_enum, default_value_t)]
        problem: ProblemKind,
    },
}

fn configure_logging(verbose: bool) {
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(level_filter)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    configure_logging(args.verbose);

    let mut stdout = std::io::stdout().lock();
    match args.command {
        Command::Solve {
            file,
            problem,
            measure,
            test,
            seed,
        } => {
            let mut options = SolveOptions::default()
                .with_problem(problem)
                .with_measure(measure);
            if let Some(expected) = test {
                options = options.with_check(expected);
            }
            if let Some(seed) = seed {
                options = options.with_seed(seed);
            }

            let report = solve_file(&file, &options)?;
            let rendered = render_report(&file, &report, &options)?;
            if !rendered.is_empty() {
                writeln!(stdout, "{rendered}")?;
            }
        }
        Command::Batch {
            instances,
            jobs,
            difficulty,
            test,
            measure,
            problem,
        } => {
            let mut config = BatchConfig::new(instances)
                .with_measure(measure)
                .with_problem(problem);
            if let Some(jobs) = jobs {
                config = config.with_jobs(jobs);
            }
            if let Some(max) = difficulty {
                config = config.with_max_difficulty(max);
            }
            if let Some(dir) = test {
                if measure {
                    warn!("timing requested, correctness testing is ignored");
                }
                config = config.with_check_dir(dir);
            }

            let outcome = BatchRunner::with_processes(config)?.run()?;
            for line in outcome.lines() {
                writeln!(stdout, "{line}")?;
            }
            info!("{} of {} workers failed", outcome.failures(), outcome.reports.len());
        }
    }
    Ok(())
}
