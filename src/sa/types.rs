//! Core trait for Simulated Annealing.

use rand::Rng;

/// Defines a problem domain the annealing engine can search over.
///
/// The implementor supplies the candidate state representation together
/// with neighbor generation, the hard-constraint check and the objective.
/// The engine handles temperature management, the acceptance criterion
/// and cooling.
///
/// # Maximization
///
/// The objective is maximized: higher is better. A move is scored by
/// `cost = objective(current) - objective(neighbor)`, so a negative cost
/// is an improvement.
///
/// # Examples
///
/// ```ignore
/// struct OneMax { n: usize }
///
/// impl SaProblem for OneMax {
///     type Solution = Vec<bool>;
///
///     fn size(&self) -> usize { self.n }
///
///     fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Vec<bool> {
///         vec![false; self.n]
///     }
///
///     fn neighbor<R: Rng>(&self, bits: &Vec<bool>, rng: &mut R) -> Vec<bool> {
///         let mut next = bits.clone();
///         let i = rng.random_range(0..self.n);
///         next[i] = !next[i];
///         next
///     }
///
///     fn is_feasible(&self, _bits: &Vec<bool>) -> bool { true }
///
///     fn objective(&self, bits: &Vec<bool>) -> f64 {
///         bits.iter().filter(|&&b| b).count() as f64
///     }
/// }
/// ```
pub trait SaProblem: Send + Sync {
    /// The candidate state type. Cloning must be a deep copy.
    type Solution: Clone + Send;

    /// Number of elements (items or terms) a neighbor move picks from.
    ///
    /// Used to scale the cooling schedule; see [`SaConfig::for_size`].
    ///
    /// [`SaConfig::for_size`]: super::SaConfig::for_size
    fn size(&self) -> usize;

    /// Creates the state the search starts from.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Returns a copy of `solution` with one uniformly chosen element flipped.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;

    /// Whether `solution` satisfies every hard constraint of the instance.
    fn is_feasible(&self, solution: &Self::Solution) -> bool;

    /// Quality of `solution`. Higher is better.
    fn objective(&self, solution: &Self::Solution) -> f64;
}
