//! SA execution loop.

use super::config::SaConfig;
use super::types::SaProblem;
use crate::error::{Error, Result};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// Best state held during the run. Feasible whenever `feasible` is set.
    pub best: S,

    /// Objective of `best`.
    pub best_objective: f64,

    /// Whether `best` satisfies the instance constraints.
    ///
    /// Only false when the initial state was infeasible and no neighbor
    /// was ever accepted.
    pub feasible: bool,

    /// The current state when the schedule froze.
    pub last: S,

    /// Total number of neighbor evaluations.
    pub iterations: usize,

    /// Number of temperature levels visited.
    pub steps: usize,

    /// Temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,
}

/// Progress notifications emitted by [`SaRunner::run_observed`].
#[derive(Debug, Clone, Copy)]
pub enum SaEvent<'a, S> {
    /// A neighbor replaced the current state.
    Accepted {
        state: &'a S,
        objective: f64,
        temperature: f64,
    },
    /// The inner loop finished and the temperature was lowered.
    Cooled { from: f64, to: f64 },
}

/// Metropolis acceptance test for a move of the given `cost`.
///
/// `cost = objective(current) - objective(neighbor)`. Non-positive costs
/// are always accepted; otherwise the move is taken with probability
/// `exp(-cost / temperature)`.
pub fn metropolis_accept<R: Rng>(cost: f64, temperature: f64, rng: &mut R) -> bool {
    if cost <= 0.0 {
        return true;
    }
    if temperature <= 0.0 {
        return false;
    }
    rng.random::<f64>() < (-cost / temperature).exp()
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA with an RNG seeded from `config.seed` (or entropy).
    pub fn run<P: SaProblem>(problem: &P, config: &SaConfig) -> Result<SaResult<P::Solution>> {
        let mut rng = create_rng(config.seed);
        Self::run_with_rng(problem, config, &mut rng)
    }

    /// Runs SA drawing all randomness from `rng`.
    pub fn run_with_rng<P: SaProblem, R: Rng>(
        problem: &P,
        config: &SaConfig,
        rng: &mut R,
    ) -> Result<SaResult<P::Solution>> {
        Self::run_observed(problem, config, rng, |_| {})
    }

    /// Runs SA and reports every accepted move and cooling step to `observe`.
    pub fn run_observed<P, R, F>(
        problem: &P,
        config: &SaConfig,
        rng: &mut R,
        mut observe: F,
    ) -> Result<SaResult<P::Solution>>
    where
        P: SaProblem,
        R: Rng,
        F: FnMut(SaEvent<'_, P::Solution>),
    {
        config.validate()?;

        let mut current = problem.initial_solution(rng);
        let mut current_objective = problem.objective(&current);
        let mut feasible = problem.is_feasible(&current);
        let mut best = current.clone();
        let mut best_objective = current_objective;
        if !feasible {
            debug!("initial state is infeasible, waiting for a feasible neighbor");
        }

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut steps = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        while temperature > config.min_temperature {
            for _ in 0..config.iterations_per_temperature {
                iterations += 1;

                let neighbor = problem.neighbor(&current, rng);
                if !problem.is_feasible(&neighbor) {
                    continue;
                }
                let neighbor_objective = problem.objective(&neighbor);
                let cost = current_objective - neighbor_objective;
                if !metropolis_accept(cost, temperature, rng) {
                    continue;
                }

                if cost < 0.0 {
                    improving_moves += 1;
                }
                accepted_moves += 1;
                current = neighbor;
                current_objective = neighbor_objective;
                observe(SaEvent::Accepted {
                    state: &current,
                    objective: current_objective,
                    temperature,
                });

                if !feasible || current_objective > best_objective {
                    best = current.clone();
                    best_objective = current_objective;
                    feasible = true;
                }
            }

            let next = temperature * config.cooling_factor;
            observe(SaEvent::Cooled {
                from: temperature,
                to: next,
            });
            temperature = next;
            steps += 1;
        }

        debug!(
            "annealing frozen after {steps} steps / {iterations} iterations: \
             accepted {accepted_moves}, improving {improving_moves}, best {best_objective}"
        );

        Ok(SaResult {
            best,
            best_objective,
            feasible,
            last: current,
            iterations,
            steps,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
        })
    }
}

/// An engine with an optionally bound problem domain.
///
/// Running without a bound problem fails with [`Error::Config`] before any
/// state is created.
#[derive(Debug, Clone)]
pub struct Annealer<P> {
    problem: Option<P>,
    config: SaConfig,
}

impl<P: SaProblem> Annealer<P> {
    pub fn new(config: SaConfig) -> Self {
        Self {
            problem: None,
            config,
        }
    }

    /// Binds the problem domain the engine searches over.
    pub fn bind(mut self, problem: P) -> Self {
        self.problem = Some(problem);
        self
    }

    pub fn problem(&self) -> Option<&P> {
        self.problem.as_ref()
    }

    pub fn config(&self) -> &SaConfig {
        &self.config
    }

    pub fn run(&self) -> Result<SaResult<P::Solution>> {
        let mut rng = create_rng(self.config.seed);
        self.run_with_rng(&mut rng)
    }

    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> Result<SaResult<P::Solution>> {
        let problem = self
            .problem
            .as_ref()
            .ok_or_else(|| Error::config("no problem domain bound to the annealing engine"))?;
        SaRunner::run_with_rng(problem, &self.config, rng)
    }
}

fn create_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(rand::random))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ---- Bounded OneMax: maximize set bits, at most `limit` may be set ----

    struct BoundedOneMax {
        n: usize,
        limit: usize,
        initial_calls: AtomicUsize,
    }

    impl BoundedOneMax {
        fn new(n: usize, limit: usize) -> Self {
            Self {
                n,
                limit,
                initial_calls: AtomicUsize::new(0),
            }
        }
    }

    impl SaProblem for BoundedOneMax {
        type Solution = Vec<bool>;

        fn size(&self) -> usize {
            self.n
        }

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Vec<bool> {
            self.initial_calls.fetch_add(1, Ordering::SeqCst);
            vec![false; self.n]
        }

        fn neighbor<R: Rng>(&self, bits: &Vec<bool>, rng: &mut R) -> Vec<bool> {
            let mut next = bits.clone();
            let i = rng.random_range(0..self.n);
            next[i] = !next[i];
            next
        }

        fn is_feasible(&self, bits: &Vec<bool>) -> bool {
            bits.iter().filter(|&&b| b).count() <= self.limit
        }

        fn objective(&self, bits: &Vec<bool>) -> f64 {
            bits.iter().filter(|&&b| b).count() as f64
        }
    }

    // ---- Starts infeasible and every neighbor stays infeasible ----

    struct NeverFeasible;

    impl SaProblem for NeverFeasible {
        type Solution = u32;

        fn size(&self) -> usize {
            1
        }

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> u32 {
            0
        }

        fn neighbor<R: Rng>(&self, x: &u32, _rng: &mut R) -> u32 {
            x + 1
        }

        fn is_feasible(&self, _x: &u32) -> bool {
            false
        }

        fn objective(&self, x: &u32) -> f64 {
            *x as f64
        }
    }

    fn config() -> SaConfig {
        SaConfig::default()
            .with_initial_temperature(20.0)
            .with_min_temperature(1.0)
            .with_iterations_per_temperature(30)
            .with_seed(42)
    }

    #[test]
    fn test_sa_bounded_onemax_reaches_limit() {
        let problem = BoundedOneMax::new(30, 12);
        let result = SaRunner::run(&problem, &config()).unwrap();

        assert!(result.feasible);
        assert!((result.best_objective - 12.0).abs() < 1e-12);
        assert!(result.improving_moves > 0);
        assert!(result.accepted_moves >= result.improving_moves);
    }

    #[test]
    fn test_sa_every_accepted_state_is_feasible() {
        let problem = BoundedOneMax::new(20, 5);
        let mut rng = StdRng::seed_from_u64(7);
        let mut accepted = 0usize;
        let result = SaRunner::run_observed(&problem, &config(), &mut rng, |event| {
            if let SaEvent::Accepted { state, .. } = event {
                accepted += 1;
                assert!(problem.is_feasible(state));
            }
        })
        .unwrap();

        assert_eq!(accepted, result.accepted_moves);
        assert!(problem.is_feasible(&result.best));
        assert!(problem.is_feasible(&result.last));
    }

    #[test]
    fn test_sa_cooling_is_geometric_and_bounded() {
        let problem = BoundedOneMax::new(10, 10);
        let config = config();
        let mut rng = StdRng::seed_from_u64(1);
        let mut previous = config.initial_temperature;
        let mut cooled = 0usize;
        let result = SaRunner::run_observed(&problem, &config, &mut rng, |event| {
            if let SaEvent::Cooled { from, to } = event {
                cooled += 1;
                assert!((from - previous).abs() < 1e-12);
                assert!(to < from);
                assert!((to - 0.99 * from).abs() < 1e-12);
                previous = to;
            }
        })
        .unwrap();

        assert_eq!(cooled, result.steps);
        assert!(result.steps <= config.max_steps());
        assert!(result.final_temperature <= config.min_temperature);
        assert_eq!(result.iterations, result.steps * config.iterations_per_temperature);
    }

    #[test]
    fn test_sa_seeded_runs_are_reproducible() {
        let problem = BoundedOneMax::new(25, 9);
        let a = SaRunner::run(&problem, &config()).unwrap();
        let b = SaRunner::run(&problem, &config()).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.accepted_moves, b.accepted_moves);
    }

    #[test]
    fn test_sa_invalid_config_fails_before_search() {
        let problem = BoundedOneMax::new(5, 5);
        let config = config().with_cooling_factor(1.0);
        let err = SaRunner::run(&problem, &config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(problem.initial_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_sa_infeasible_start_is_reported() {
        let result = SaRunner::run(&NeverFeasible, &config()).unwrap();
        assert!(!result.feasible);
        assert_eq!(result.accepted_moves, 0);
        assert_eq!(result.best, 0);
    }

    #[test]
    fn test_annealer_unbound_is_config_error() {
        let annealer: Annealer<BoundedOneMax> = Annealer::new(config());
        assert!(annealer.problem().is_none());
        assert!(matches!(annealer.run(), Err(Error::Config(_))));
    }

    #[test]
    fn test_annealer_bound_runs() {
        let annealer = Annealer::new(config()).bind(BoundedOneMax::new(8, 3));
        let result = annealer.run().unwrap();
        assert!(result.feasible);
        assert!(result.best_objective <= 3.0);
    }

    #[test]
    fn test_metropolis_non_positive_cost_always_accepted() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            assert!(metropolis_accept(-2.5, 1.0, &mut rng));
            assert!(metropolis_accept(0.0, 1e-9, &mut rng));
        }
    }

    #[test]
    fn test_metropolis_uphill_probability_matches_exp() {
        let mut rng = StdRng::seed_from_u64(11);
        let trials = 200_000;
        for &(cost, temperature) in &[(1.0, 1.0), (3.0, 10.0), (5.0, 2.0)] {
            let hits = (0..trials)
                .filter(|_| metropolis_accept(cost, temperature, &mut rng))
                .count();
            let observed = hits as f64 / trials as f64;
            let expected = (-cost / temperature).exp();
            assert!(
                (observed - expected).abs() < 0.01,
                "cost {cost} at T {temperature}: observed {observed}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_metropolis_zero_temperature_rejects_uphill() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(!metropolis_accept(1.0, 0.0, &mut rng));
    }
}
