//! Weighted SAT instances and truth assignments.

/// A named boolean variable carrying a weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub name: String,
    pub weight: u64,
}

impl Term {
    pub fn new(name: impl Into<String>, weight: u64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// A reference to a term, possibly negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    /// Index into [`SatInstance::terms`].
    pub term: usize,
    pub negated: bool,
}

impl Literal {
    pub fn new(term: usize, negated: bool) -> Self {
        Self { term, negated }
    }

    pub fn is_true(&self, assignment: &Assignment) -> bool {
        assignment.value(self.term) != self.negated
    }
}

/// A disjunction of literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.literals.iter().any(|lit| lit.is_true(assignment))
    }
}

/// A parsed weighted SAT instance. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatInstance {
    pub id: u64,
    pub terms: Vec<Term>,
    pub clauses: Vec<Clause>,
}

impl SatInstance {
    pub fn new(id: u64, terms: Vec<Term>, clauses: Vec<Clause>) -> Self {
        Self { id, terms, clauses }
    }

    /// Sum of all term weights, or `None` if it overflows.
    ///
    /// When this is `Some`, no [`Assignment`] over the instance can overflow.
    pub fn checked_weight(&self) -> Option<u64> {
        self.terms
            .iter()
            .try_fold(0u64, |total, term| total.checked_add(term.weight))
    }

    /// Whether every clause holds under `assignment`.
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|clause| clause.is_satisfied(assignment))
    }
}

/// A value for every term, with the weight of true terms kept current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<bool>,
    weight: u64,
}

impl Assignment {
    /// Every term false.
    pub fn all_false(len: usize) -> Self {
        Self {
            values: vec![false; len],
            weight: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, index: usize) -> bool {
        self.values[index]
    }

    /// Sets term `index` to `value`, adjusting the weight by `term.weight`.
    pub fn set(&mut self, index: usize, term: &Term, value: bool) {
        if self.values[index] == value {
            return;
        }
        self.values[index] = value;
        if value {
            self.weight += term.weight;
        } else {
            self.weight -= term.weight;
        }
    }

    pub fn toggle(&mut self, index: usize, term: &Term) {
        let value = !self.values[index];
        self.set(index, term, value);
    }

    /// Sum of the weights of true terms.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn values(&self) -> &[bool] {
        &self.values
    }
}
