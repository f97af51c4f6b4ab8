//! Die terms: same-size, same-category groups of rolled dice.

use serde::{Deserialize, Serialize};

use crate::{Category, Die};

/// A rolled group of same-sized dice sharing one category.
///
/// Terms are constructed whole when a roll is generated. Individual results
/// are never mutated in place; a changed die is spliced through
/// [`crate::DicePool::replace_result`] so the pool total stays consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieTerm {
    /// The die type shared by every result in the term.
    pub die: Die,
    /// The category tag, or `None` to fall back to the pool default.
    pub category: Option<Category>,
    /// Individual face results, each in `1..=die.sides()`.
    pub results: Vec<u32>,
}

impl DieTerm {
    /// Create a new term.
    pub fn new(die: Die, category: Option<Category>, results: Vec<u32>) -> Self {
        Self {
            die,
            category,
            results,
        }
    }

    /// Number of dice in the term.
    pub fn count(&self) -> usize {
        self.results.len()
    }

    /// Sum of all results in the term.
    pub fn sum(&self) -> i64 {
        self.results.iter().map(|&v| i64::from(v)).sum()
    }

    /// How many dice currently show the die's maximum face.
    pub fn max_face_count(&self) -> u32 {
        let sides = self.die.sides();
        self.results.iter().filter(|&&v| v == sides).count() as u32
    }

    /// The term's category, resolved against the pool default.
    pub fn resolved_category(&self, fallback: &Category) -> Category {
        self.category.clone().unwrap_or_else(|| fallback.clone())
    }
}

impl std::fmt::Display for DieTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.results.iter().map(|v| v.to_string()).collect();
        write!(
            f,
            "{}{} [{}]",
            self.results.len(),
            self.die,
            values.join(", ")
        )
    }
}
