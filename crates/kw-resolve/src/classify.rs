//! Eligibility classification over a dice pool.
//!
//! A [`FrequencyTable`] maps each (category, side count) group to the number
//! of dice currently eligible for the operation at hand. It is derived,
//! recomputed from scratch every time the pool changes, and never persisted;
//! individual die indices are resolved lazily at selection time.

use std::collections::BTreeMap;

use kw_dice::{Category, DicePool};

/// Per-category, per-side-count eligibility counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Category, BTreeMap<u32, u32>>,
}

impl FrequencyTable {
    /// True if no group has any eligible dice.
    pub fn is_empty(&self) -> bool {
        self.counts
            .values()
            .all(|by_sides| by_sides.values().all(|&n| n == 0))
    }

    /// Eligible count for one (category, sides) group.
    pub fn count_for(&self, category: &Category, sides: u32) -> u32 {
        self.counts
            .get(category)
            .and_then(|by_sides| by_sides.get(&sides))
            .copied()
            .unwrap_or(0)
    }

    /// Iterate categories with a nonzero count at the given side count,
    /// in category order.
    pub fn categories_at(&self, sides: u32) -> impl Iterator<Item = (&Category, u32)> {
        self.counts.iter().filter_map(move |(category, by_sides)| {
            match by_sides.get(&sides).copied().unwrap_or(0) {
                0 => None,
                n => Some((category, n)),
            }
        })
    }

    fn bump(&mut self, category: Category, sides: u32, by: u32) {
        if by == 0 {
            return;
        }
        *self
            .counts
            .entry(category)
            .or_default()
            .entry(sides)
            .or_insert(0) += by;
    }
}

/// Classify the pool with a stateless predicate over `(sides, value)`.
/// Modifier terms carry no dice and are skipped.
pub fn classify_with(pool: &DicePool, pred: impl Fn(u32, u32) -> bool) -> FrequencyTable {
    let mut table = FrequencyTable::default();
    for (_, term) in pool.dice_terms() {
        let sides = term.die.sides();
        let eligible = term.results.iter().filter(|&&v| pred(sides, v)).count() as u32;
        table.bump(
            term.resolved_category(pool.default_category()),
            sides,
            eligible,
        );
    }
    table
}

/// Explosion eligibility: dice showing their maximum face.
pub fn classify_maximums(pool: &DicePool) -> FrequencyTable {
    classify_with(pool, |sides, value| value == sides)
}

/// Reroll eligibility: dice tied at the lowest value rolled for their
/// (category, sides) group.
///
/// Two-pass scan: the first pass finds the minimum per group across all
/// matching dice, the second counts how many results equal that minimum.
pub fn classify_tied_minimum(pool: &DicePool) -> FrequencyTable {
    let mut minima: BTreeMap<(Category, u32), u32> = BTreeMap::new();
    for (_, term) in pool.dice_terms() {
        let key = (
            term.resolved_category(pool.default_category()),
            term.die.sides(),
        );
        for &value in &term.results {
            minima
                .entry(key.clone())
                .and_modify(|min| *min = (*min).min(value))
                .or_insert(value);
        }
    }

    let mut table = FrequencyTable::default();
    for (_, term) in pool.dice_terms() {
        let key = (
            term.resolved_category(pool.default_category()),
            term.die.sides(),
        );
        let Some(&min) = minima.get(&key) else {
            continue;
        };
        let tied = term.results.iter().filter(|&&v| v == min).count() as u32;
        table.bump(key.0, key.1, tied);
    }
    table
}
