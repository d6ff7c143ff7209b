//! Knapsack instances and candidate selections.

/// One item that may be packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub weight: u64,
    pub price: u64,
}

impl Item {
    pub fn new(weight: u64, price: u64) -> Self {
        Self { weight, price }
    }
}

/// A parsed 0/1 knapsack instance. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnapsackInstance {
    pub id: u64,
    /// Maximum total weight of a selection.
    pub capacity: u64,
    pub items: Vec<Item>,
}

impl KnapsackInstance {
    pub fn new(id: u64, capacity: u64, items: Vec<Item>) -> Self {
        Self {
            id,
            capacity,
            items,
        }
    }

    /// Total weight and price of all items, or `None` if either overflows.
    ///
    /// When this is `Some`, no [`Selection`] over the instance can overflow.
    pub fn checked_totals(&self) -> Option<(u64, u64)> {
        self.items.iter().try_fold((0u64, 0u64), |(weight, price), item| {
            Some((
                weight.checked_add(item.weight)?,
                price.checked_add(item.price)?,
            ))
        })
    }
}

/// A subset of an instance's items with incrementally maintained totals.
///
/// `weight` and `price` always equal the sums over the selected items;
/// every mutation adjusts them by one item instead of recomputing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    selected: Vec<bool>,
    weight: u64,
    price: u64,
}

impl Selection {
    /// The empty selection over `len` items.
    pub fn empty(len: usize) -> Self {
        Self {
            selected: vec![false; len],
            weight: 0,
            price: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.selected[index]
    }

    /// Selects item `index`. Returns false if it was already selected.
    pub fn add(&mut self, index: usize, item: &Item) -> bool {
        if self.selected[index] {
            return false;
        }
        self.selected[index] = true;
        self.weight += item.weight;
        self.price += item.price;
        true
    }

    /// Deselects item `index`. Returns false if it was not selected.
    pub fn remove(&mut self, index: usize, item: &Item) -> bool {
        if !self.selected[index] {
            return false;
        }
        self.selected[index] = false;
        self.weight -= item.weight;
        self.price -= item.price;
        true
    }

    /// Flips the membership of item `index`.
    pub fn toggle(&mut self, index: usize, item: &Item) {
        if !self.remove(index, item) {
            self.add(index, item);
        }
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    /// Membership flags in original item order.
    pub fn bits(&self) -> &[bool] {
        &self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn items() -> Vec<Item> {
        vec![Item::new(2, 3), Item::new(3, 4), Item::new(4, 5)]
    }

    #[test]
    fn test_checked_totals() {
        let instance = KnapsackInstance::new(1, 10, items());
        assert_eq!(instance.checked_totals(), Some((9, 12)));

        let heavy = vec![Item::new(u64::MAX, 1), Item::new(1, 1)];
        assert_eq!(KnapsackInstance::new(1, u64::MAX, heavy).checked_totals(), None);
        let pricey = vec![Item::new(1, u64::MAX), Item::new(1, 1)];
        assert_eq!(KnapsackInstance::new(1, 5, pricey).checked_totals(), None);
    }

    #[test]
    fn test_add_remove_maintain_totals() {
        let items = items();
        let mut s = Selection::empty(items.len());
        assert!(s.add(1, &items[1]));
        assert!(s.add(2, &items[2]));
        assert!(!s.add(2, &items[2]));
        assert_eq!((s.weight(), s.price()), (7, 9));

        assert!(s.remove(1, &items[1]));
        assert!(!s.remove(1, &items[1]));
        assert_eq!((s.weight(), s.price()), (4, 5));
        assert_eq!(s.bits(), &[false, false, true]);
    }

    #[test]
    fn test_clone_is_independent() {
        let items = items();
        let mut a = Selection::empty(items.len());
        a.add(0, &items[0]);
        let mut b = a.clone();
        b.toggle(0, &items[0]);
        assert!(a.contains(0));
        assert!(!b.contains(0));
        assert_eq!(a.weight(), 2);
        assert_eq!(b.weight(), 0);
    }

    proptest! {
        #[test]
        fn prop_totals_match_selected_sum(
            raw in prop::collection::vec((0u64..1000, 0u64..1000), 1..20),
            flips in prop::collection::vec(any::<prop::sample::Index>(), 0..100),
        ) {
            let items: Vec<Item> = raw.iter().map(|&(w, p)| Item::new(w, p)).collect();
            let mut s = Selection::empty(items.len());
            for flip in flips {
                let i = flip.index(items.len());
                s.toggle(i, &items[i]);
            }
            let (w, p) = items
                .iter()
                .zip(s.bits())
                .filter(|(_, &on)| on)
                .fold((0, 0), |(w, p), (item, _)| (w + item.weight, p + item.price));
            prop_assert_eq!(s.weight(), w);
            prop_assert_eq!(s.price(), p);
        }
    }
}
