//! Weighted SAT binding of [`SaProblem`].

use super::types::{Assignment, SatInstance};
use crate::sa::SaProblem;
use rand::Rng;

/// Searches over truth assignments of one instance.
///
/// Starts with every term false; a neighbor flips one uniformly chosen
/// term; an assignment is feasible when every clause holds; the objective
/// is the weight of the true terms.
#[derive(Debug, Clone, Copy)]
pub struct SatProblem<'a> {
    instance: &'a SatInstance,
}

impl<'a> SatProblem<'a> {
    pub fn new(instance: &'a SatInstance) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> &'a SatInstance {
        self.instance
    }
}

impl SaProblem for SatProblem<'_> {
    type Solution = Assignment;

    fn size(&self) -> usize {
        self.instance.terms.len()
    }

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Assignment {
        Assignment::all_false(self.instance.terms.len())
    }

    fn neighbor<R: Rng>(&self, solution: &Assignment, rng: &mut R) -> Assignment {
        let mut next = solution.clone();
        let terms = &self.instance.terms;
        if !terms.is_empty() {
            let index = rng.random_range(0..terms.len());
            next.toggle(index, &terms[index]);
        }
        next
    }

    fn is_feasible(&self, solution: &Assignment) -> bool {
        self.instance.is_satisfied(solution)
    }

    fn objective(&self, solution: &Assignment) -> f64 {
        solution.weight() as f64
    }
}
