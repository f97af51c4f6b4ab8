//! Explosion and reroll resolution for Kettenwurf.
//!
//! Given a pool of already-rolled dice, this crate classifies dice by
//! eligibility (maximum face for explosion, tied minimum for reroll),
//! presents a budget-limited choice through an injected decision boundary,
//! rolls fresh dice through an injected roller, and splices the results back
//! into the pool while keeping its total and formula consistent.
//!
//! The decision and roll boundaries are async: a modal prompt awaiting user
//! input and a die-roll service call are both suspension points, and the
//! loop suspends at each without blocking the host's other work.

pub mod classify;
pub mod error;
pub mod explode;
pub mod policy;
pub mod prompt;
pub mod reroll;
pub mod stack;

pub use classify::{FrequencyTable, classify_maximums, classify_tied_minimum, classify_with};
pub use error::{ResolveError, ResolveResult};
pub use explode::{ExplosionReport, StopReason, run_explosion};
pub use policy::ForcePolicy;
pub use prompt::{DecisionPrompt, DieRoller, ExplodeChoice, RerollChoice, RngRoller};
pub use reroll::{RerollReport, RoundGuard, run_reroll};
pub use stack::{CANONICAL_SIDES, OptionStack, StackEntry};
