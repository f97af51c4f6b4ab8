//! The reroll variant: replace one tied-minimum die, at most once per round.

use tracing::debug;

use kw_dice::DicePool;

use crate::classify::classify_tied_minimum;
use crate::error::{ResolveError, ResolveResult};
use crate::prompt::{DecisionPrompt, DieRoller, RerollChoice};
use crate::stack::OptionStack;

/// At-most-once-per-round gate for the reroll variant.
///
/// Keyed by an opaque round identifier supplied by the host; entering a new
/// round resets the consumed flag. Plain struct, no locking: the host's
/// turn sequencing is assumed to serialize resolution passes per actor.
#[derive(Debug, Clone, Default)]
pub struct RoundGuard {
    round: Option<String>,
    consumed: bool,
}

impl RoundGuard {
    /// A fresh guard with no round recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the host's current round key, resetting the consumed flag if
    /// the key changed.
    pub fn enter_round(&mut self, key: impl Into<String>) {
        let key = key.into();
        if self.round.as_deref() != Some(key.as_str()) {
            self.round = Some(key);
            self.consumed = false;
        }
    }

    /// True if the reroll was already used this round.
    pub fn consumed(&self) -> bool {
        self.consumed
    }

    fn consume(&mut self) {
        self.consumed = true;
    }
}

/// Summary of one reroll pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RerollReport {
    /// Whether a die was actually replaced.
    pub changed: bool,
    /// Signed difference applied to the pool total (zero when unchanged).
    pub delta: i64,
}

impl RerollReport {
    fn unchanged() -> Self {
        Self {
            changed: false,
            delta: 0,
        }
    }
}

/// Run one reroll pass over `pool`.
///
/// Classifies dice tied at the lowest rolled value per (category, die)
/// group, offers the stack, and replaces exactly one matching die with a
/// fresh roll of the same type. The pool total moves by the signed delta;
/// the formula is unchanged. Gated to at most one use per round via
/// `guard`.
///
/// A selection that no longer matches any die (the pool changed between
/// classification and execution) is [`ResolveError::StaleSelection`]; the
/// pool is not mutated and the guard is not consumed.
pub async fn run_reroll(
    pool: &mut DicePool,
    prompt: &mut dyn DecisionPrompt,
    roller: &mut dyn DieRoller,
    guard: &mut RoundGuard,
) -> ResolveResult<RerollReport> {
    if guard.consumed() {
        debug!("reroll already used this round");
        return Ok(RerollReport::unchanged());
    }

    let stack = OptionStack::build(&classify_tied_minimum(pool));
    if stack.is_empty() {
        return Ok(RerollReport::unchanged());
    }

    let (category, die, value) = match prompt.choose_reroll(&stack).await {
        RerollChoice::Cancel => return Ok(RerollReport::unchanged()),
        RerollChoice::Pick {
            category,
            die,
            value,
        } => (category, die, value),
    };

    // Die indices are resolved lazily, here at execution time. The stack
    // names dice by canonical side count, so a Custom(6) term is offered
    // as D6; match on sides, not on the Die variant.
    let located = pool.dice_terms().find_map(|(term_index, term)| {
        if term.die.sides() != die.sides()
            || term.resolved_category(pool.default_category()) != category
        {
            return None;
        }
        term.results
            .iter()
            .position(|&v| v == value)
            .map(|die_index| (term_index, die_index))
    });
    let Some((term_index, die_index)) = located else {
        return Err(ResolveError::StaleSelection {
            category,
            die,
            value,
        });
    };

    let rolled = roller.roll_term(die, 1, Some(category.clone())).await;
    let Some(&new_value) = rolled.results.first() else {
        return Err(ResolveError::InvalidSelection(
            "roller returned an empty term".into(),
        ));
    };

    let delta = pool.replace_result(term_index, die_index, new_value)?;
    guard.consume();
    debug!(category = %category, die = %die, value, new_value, delta, "rerolled die");

    Ok(RerollReport {
        changed: true,
        delta,
    })
}
