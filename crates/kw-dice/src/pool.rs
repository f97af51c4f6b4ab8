//! The dice pool: ordered terms plus a running total and formula.

use serde::{Deserialize, Serialize};

use crate::error::{PoolError, PoolResult};
use crate::term::DieTerm;
use crate::{Category, Die};

/// One component of a pool: a rolled dice term or a constant modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolTerm {
    /// A group of rolled dice.
    Dice(DieTerm),
    /// A flat numeric modifier with no dice behind it.
    Modifier(i64),
}

impl PoolTerm {
    /// The dice term behind this pool term, if any.
    pub fn as_dice(&self) -> Option<&DieTerm> {
        match self {
            Self::Dice(term) => Some(term),
            Self::Modifier(_) => None,
        }
    }

    fn value(&self) -> i64 {
        match self {
            Self::Dice(term) => term.sum(),
            Self::Modifier(m) => *m,
        }
    }
}

/// An ordered sequence of pool terms with a running total and formula.
///
/// Invariant: `total` always equals the sum implied by the terms
/// ([`Self::recomputed_total`]); every splice operation updates the terms,
/// the total, and the formula in one step. The pool is exclusively owned by
/// a single resolution pass for its lifetime and handed back to the host
/// when the pass completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    terms: Vec<PoolTerm>,
    total: i64,
    formula: String,
    default_category: Category,
}

impl DicePool {
    /// Build a pool from pre-rolled terms, deriving the total and formula.
    pub fn from_terms(terms: Vec<PoolTerm>, default_category: Category) -> PoolResult<Self> {
        for term in &terms {
            if let PoolTerm::Dice(dice) = term {
                validate_term(dice)?;
            }
        }
        let total = terms.iter().map(PoolTerm::value).sum();
        let formula = render_formula(&terms);
        Ok(Self {
            terms,
            total,
            formula,
            default_category,
        })
    }

    /// The terms in pool order.
    pub fn terms(&self) -> &[PoolTerm] {
        &self.terms
    }

    /// The running total.
    pub fn total(&self) -> i64 {
        self.total
    }

    /// The formula rendering, e.g. `"3d6 + 2d8 + 4"`.
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// The category an untagged term resolves to.
    pub fn default_category(&self) -> &Category {
        &self.default_category
    }

    /// Iterate the dice terms (skipping modifiers) with their pool indices.
    pub fn dice_terms(&self) -> impl Iterator<Item = (usize, &DieTerm)> {
        self.terms
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.as_dice().map(|d| (i, d)))
    }

    /// Recompute the total from scratch. Equals [`Self::total`] by invariant;
    /// exposed so callers can audit the pool after a sequence of splices.
    pub fn recomputed_total(&self) -> i64 {
        self.terms.iter().map(PoolTerm::value).sum()
    }

    /// Append a freshly rolled term, adding its sum to the total and
    /// `" + <n>d<sides>"` to the formula in the same step.
    pub fn push_rolled_term(&mut self, term: DieTerm) -> PoolResult<()> {
        validate_term(&term)?;
        self.total += term.sum();
        if self.formula.is_empty() {
            self.formula = format!("{}{}", term.count(), term.die);
        } else {
            self.formula
                .push_str(&format!(" + {}{}", term.count(), term.die));
        }
        self.terms.push(PoolTerm::Dice(term));
        Ok(())
    }

    /// Replace one die's result within an existing term, applying the signed
    /// delta to the total. The formula is unchanged (same term, same die
    /// count). Returns the delta.
    pub fn replace_result(
        &mut self,
        term_index: usize,
        die_index: usize,
        new_value: u32,
    ) -> PoolResult<i64> {
        let term = match self.terms.get_mut(term_index) {
            None => return Err(PoolError::TermIndexOutOfRange(term_index)),
            Some(PoolTerm::Modifier(_)) => return Err(PoolError::NotADiceTerm(term_index)),
            Some(PoolTerm::Dice(term)) => term,
        };
        if new_value < 1 || new_value > term.die.sides() {
            return Err(PoolError::ResultOutOfRange {
                die: term.die,
                value: new_value,
            });
        }
        let old = *term
            .results
            .get(die_index)
            .ok_or(PoolError::DieIndexOutOfRange {
                term: term_index,
                die_index,
            })?;
        term.results[die_index] = new_value;
        let delta = i64::from(new_value) - i64::from(old);
        self.total += delta;
        Ok(delta)
    }
}

impl std::fmt::Display for DicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.formula, self.total)
    }
}

fn validate_term(term: &DieTerm) -> PoolResult<()> {
    let sides = term.die.sides();
    if sides < 2 {
        return Err(PoolError::InvalidDie(sides));
    }
    for &value in &term.results {
        if value < 1 || value > sides {
            return Err(PoolError::ResultOutOfRange {
                die: term.die,
                value,
            });
        }
    }
    Ok(())
}

fn render_formula(terms: &[PoolTerm]) -> String {
    let mut out = String::new();
    for term in terms {
        let piece = match term {
            PoolTerm::Dice(dice) => format!("{}{}", dice.count(), dice.die),
            PoolTerm::Modifier(m) => m.abs().to_string(),
        };
        let negative = matches!(term, PoolTerm::Modifier(m) if *m < 0);
        if out.is_empty() {
            if negative {
                out.push('-');
            }
            out.push_str(&piece);
        } else {
            out.push_str(if negative { " - " } else { " + " });
            out.push_str(&piece);
        }
    }
    out
}
