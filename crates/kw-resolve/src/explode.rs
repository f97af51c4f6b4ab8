//! The budgeted selection loop for dice explosions.

use tracing::{debug, warn};

use kw_dice::DicePool;

use crate::classify::classify_maximums;
use crate::error::{ResolveError, ResolveResult};
use crate::policy::ForcePolicy;
use crate::prompt::{DecisionPrompt, DieRoller, ExplodeChoice};
use crate::stack::OptionStack;

/// Why the explosion loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every budgeted die was spent.
    BudgetExhausted,
    /// No die in the pool was eligible to explode.
    NoEligibleDice,
    /// The deciding party made no selection and the policy allows stopping.
    Declined,
    /// The prompt was cancelled.
    Cancelled,
}

/// Summary of one explosion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplosionReport {
    /// Total dice added to the pool.
    pub spent: u32,
    /// Number of selections that were executed.
    pub iterations: u32,
    /// Why the pass ended.
    pub stopped: StopReason,
}

/// Run one budgeted explosion pass over `pool`.
///
/// Repeats while budget remains: classify the pool for dice at their
/// maximum face, build the option stack, obtain a selection (or auto-select
/// a sole option per `policy`), roll the selected dice through `roller`,
/// and splice them into the pool. Each committed iteration updates the
/// pool's total and formula atomically, so an error in a later iteration
/// leaves the pool at the last consistent state.
///
/// Termination is guaranteed: the budget strictly decreases on every
/// executed selection, and the loop also ends on an empty stack, a decline
/// (unless `policy.require_full_spend`), or a cancellation.
pub async fn run_explosion(
    pool: &mut DicePool,
    budget: u32,
    prompt: &mut dyn DecisionPrompt,
    roller: &mut dyn DieRoller,
    policy: ForcePolicy,
) -> ResolveResult<ExplosionReport> {
    let mut remaining = budget;
    let mut spent = 0;
    let mut iterations = 0;

    let stopped = loop {
        if remaining == 0 {
            break StopReason::BudgetExhausted;
        }

        // Full reclassification every iteration is the source of truth;
        // chain counts from the previous splice are logged only.
        let stack = OptionStack::build(&classify_maximums(pool));
        if stack.is_empty() {
            break StopReason::NoEligibleDice;
        }

        let choice = match stack.single() {
            Some(entry) if policy.auto_select_single => ExplodeChoice::Pick {
                category: entry.category.clone(),
                die: entry.die,
                count: entry.available.min(remaining),
            },
            _ => prompt.choose_explosion(&stack, remaining).await,
        };

        let (category, die, count) = match choice {
            ExplodeChoice::Cancel => break StopReason::Cancelled,
            ExplodeChoice::Pass => {
                if policy.require_full_spend {
                    debug!("empty selection with budget remaining, re-prompting");
                    continue;
                }
                break StopReason::Declined;
            }
            ExplodeChoice::Pick {
                category,
                die,
                count,
            } => (category, die, count),
        };

        if count == 0 || count > remaining {
            warn!(count, remaining, "selection count outside offered range");
            return Err(ResolveError::InvalidSelection(format!(
                "count {count} not in 1..={remaining}"
            )));
        }

        let term = roller.roll_term(die, count, Some(category.clone())).await;
        if term.die.sides() != die.sides() || term.count() as u32 != count {
            return Err(ResolveError::InvalidSelection(format!(
                "roller returned {} for a request of {count}{die}",
                term
            )));
        }

        // Chain bookkeeping: how many of the new dice exploded in turn.
        // Informational only — the next iteration recounts from scratch.
        let chained = term.max_face_count();
        pool.push_rolled_term(term)?;
        debug!(category = %category, die = %die, count, chained, "spliced explosion dice");

        spent += count;
        remaining -= count;
        iterations += 1;
    };

    debug!(?stopped, spent, iterations, "explosion pass finished");
    Ok(ExplosionReport {
        spent,
        iterations,
        stopped,
    })
}
