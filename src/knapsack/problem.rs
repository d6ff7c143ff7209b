//! Knapsack binding of [`SaProblem`].

use super::types::{KnapsackInstance, Selection};
use crate::sa::SaProblem;
use rand::Rng;

/// Searches over item selections of one instance.
///
/// Starts from the empty selection; a neighbor flips one uniformly chosen
/// item; a selection is feasible while its weight fits the capacity; the
/// objective is the total price.
#[derive(Debug, Clone, Copy)]
pub struct KnapsackProblem<'a> {
    instance: &'a KnapsackInstance,
}

impl<'a> KnapsackProblem<'a> {
    pub fn new(instance: &'a KnapsackInstance) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> &'a KnapsackInstance {
        self.instance
    }
}

impl SaProblem for KnapsackProblem<'_> {
    type Solution = Selection;

    fn size(&self) -> usize {
        self.instance.items.len()
    }

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Selection {
        Selection::empty(self.instance.items.len())
    }

    fn neighbor<R: Rng>(&self, solution: &Selection, rng: &mut R) -> Selection {
        let mut next = solution.clone();
        let items = &self.instance.items;
        if !items.is_empty() {
            let index = rng.random_range(0..items.len());
            next.toggle(index, &items[index]);
        }
        next
    }

    fn is_feasible(&self, solution: &Selection) -> bool {
        solution.weight() <= self.instance.capacity
    }

    fn objective(&self, solution: &Selection) -> f64 {
        solution.price() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knapsack::{parse_line, Item};
    use crate::sa::{SaConfig, SaEvent, SaRunner};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small() -> KnapsackInstance {
        KnapsackInstance::new(
            1,
            10,
            vec![Item::new(2, 3), Item::new(3, 4), Item::new(4, 5)],
        )
    }

    #[test]
    fn test_neighbor_flips_exactly_one_item() {
        let instance = small();
        let problem = KnapsackProblem::new(&instance);
        let mut rng = StdRng::seed_from_u64(9);
        let start = problem.initial_solution(&mut rng);
        for _ in 0..50 {
            let next = problem.neighbor(&start, &mut rng);
            let flipped = start
                .bits()
                .iter()
                .zip(next.bits())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(flipped, 1);
        }
    }

    #[test]
    fn test_feasibility_is_capacity_bound() {
        let instance = KnapsackInstance::new(2, 5, vec![Item::new(3, 1), Item::new(3, 1)]);
        let problem = KnapsackProblem::new(&instance);
        let mut s = Selection::empty(2);
        s.add(0, &instance.items[0]);
        assert!(problem.is_feasible(&s));
        s.add(1, &instance.items[1]);
        assert!(!problem.is_feasible(&s));
    }

    fn optimum_reached(instance: &KnapsackInstance, optimum: u64) -> bool {
        let problem = KnapsackProblem::new(instance);
        let mut reached = false;
        for seed in 0..50 {
            let config = SaConfig::for_size(problem.size()).with_seed(seed);
            let mut rng = StdRng::seed_from_u64(seed);
            let result = SaRunner::run_observed(&problem, &config, &mut rng, |event| {
                if let SaEvent::Accepted { state, .. } = event {
                    assert!(state.weight() <= instance.capacity);
                }
            })
            .unwrap();
            assert!(result.feasible);
            assert!(result.best.weight() <= instance.capacity);
            assert!(result.best.price() <= optimum);
            reached |= result.best.price() == optimum;
        }
        reached
    }

    #[test]
    fn test_all_items_fit_when_capacity_allows() {
        // Total weight 9 fits capacity 10, so every item is packed.
        assert!(optimum_reached(&small(), 12));
    }

    #[test]
    fn test_tight_capacity_prefers_two_heaviest() {
        let mut instance = small();
        instance.capacity = 7;
        assert!(optimum_reached(&instance, 9));
    }

    #[test]
    fn test_extreme_weights_stay_within_capacity() {
        let text = format!("1 2 {} {} 1 1 1", u64::MAX - 1, u64::MAX - 1);
        let instance = parse_line(&text, 1).unwrap();
        for seed in 0..10 {
            let config = SaConfig::for_size(2).with_seed(seed);
            let result = SaRunner::run(&KnapsackProblem::new(&instance), &config).unwrap();
            assert!(result.feasible);
            assert!(result.best.weight() <= instance.capacity);
        }

        let text = format!("1 2 {max} {max} 1 1 1", max = u64::MAX);
        assert!(parse_line(&text, 1).is_err());
    }

    #[test]
    fn test_empty_instance_is_stable() {
        let instance = KnapsackInstance::new(3, 0, Vec::new());
        let problem = KnapsackProblem::new(&instance);
        let result = SaRunner::run(&problem, &SaConfig::for_size(0).with_seed(1)).unwrap();
        assert!(result.best.is_empty());
        assert_eq!(result.best.price(), 0);
    }
}
