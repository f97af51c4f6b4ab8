//! The option stack: the ordered menu of selectable dice groups.

use serde::{Deserialize, Serialize};

use kw_dice::{Category, Die};

use crate::classify::FrequencyTable;

/// The canonical side counts offered by the option stack, in presentation
/// order.
///
/// Policy, not oversight: dice with side counts outside this list are never
/// offered. Callers depend on this fixed ordering for deterministic prompt
/// layout, so it must not be replaced with a dynamic sort.
pub const CANONICAL_SIDES: [u32; 8] = [2, 4, 6, 8, 10, 12, 20, 100];

/// One selectable entry: a (category, die) group and how many of its dice
/// are currently eligible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEntry {
    /// Resolved category of the group.
    pub category: Category,
    /// Die type of the group.
    pub die: Die,
    /// Number of eligible dice in the group.
    pub available: u32,
}

/// An ordered list of selectable options, rebuilt every loop iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionStack {
    entries: Vec<StackEntry>,
}

impl OptionStack {
    /// Build a stack from a frequency table: canonical side counts
    /// outermost, categories in their natural order within a side count,
    /// zero-count groups omitted.
    pub fn build(table: &FrequencyTable) -> Self {
        let mut entries = Vec::new();
        for sides in CANONICAL_SIDES {
            let Some(die) = Die::with_sides(sides) else {
                continue;
            };
            for (category, available) in table.categories_at(sides) {
                entries.push(StackEntry {
                    category: category.clone(),
                    die,
                    available,
                });
            }
        }
        Self { entries }
    }

    /// The entries in presentation order.
    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    /// True if no group has eligible dice — "nothing to do" for the caller.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The sole entry, if the stack offers exactly one choice.
    pub fn single(&self) -> Option<&StackEntry> {
        match self.entries.as_slice() {
            [entry] => Some(entry),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_maximums;
    use kw_dice::{DicePool, DieTerm, PoolTerm};

    fn max_stack(terms: Vec<PoolTerm>) -> OptionStack {
        let pool = DicePool::from_terms(terms, Category::Untyped).unwrap();
        OptionStack::build(&classify_maximums(&pool))
    }

    #[test]
    fn empty_table_builds_empty_stack() {
        let stack = OptionStack::build(&FrequencyTable::default());
        assert!(stack.is_empty());
        assert_eq!(stack.len(), 0);
        assert!(stack.single().is_none());
    }

    #[test]
    fn canonical_side_order_wins_over_insertion_order() {
        // d20 term appears before the d6 term, but the stack leads with d6.
        let stack = max_stack(vec![
            PoolTerm::Dice(DieTerm::new(
                Die::D20,
                Some(Category::named("fire")),
                vec![20],
            )),
            PoolTerm::Dice(DieTerm::new(
                Die::D6,
                Some(Category::named("fire")),
                vec![6, 6],
            )),
        ]);
        let dice: Vec<Die> = stack.entries().iter().map(|e| e.die).collect();
        assert_eq!(dice, vec![Die::D6, Die::D20]);
        assert_eq!(stack.entries()[0].available, 2);
    }

    #[test]
    fn categories_ordered_within_a_side_count() {
        let stack = max_stack(vec![
            PoolTerm::Dice(DieTerm::new(
                Die::D6,
                Some(Category::named("piercing")),
                vec![6],
            )),
            PoolTerm::Dice(DieTerm::new(
                Die::D6,
                Some(Category::named("fire")),
                vec![6],
            )),
        ]);
        let cats: Vec<&Category> = stack.entries().iter().map(|e| &e.category).collect();
        assert_eq!(
            cats,
            vec![&Category::named("fire"), &Category::named("piercing")]
        );
    }

    #[test]
    fn non_canonical_sides_are_invisible() {
        let stack = max_stack(vec![PoolTerm::Dice(DieTerm::new(
            Die::Custom(3),
            None,
            vec![3, 3],
        ))]);
        assert!(stack.is_empty());
    }

    #[test]
    fn single_entry() {
        let stack = max_stack(vec![PoolTerm::Dice(DieTerm::new(Die::D6, None, vec![6]))]);
        let entry = stack.single().unwrap();
        assert_eq!(entry.die, Die::D6);
        assert_eq!(entry.available, 1);
    }
}
