//! The decision and die-roll boundaries.
//!
//! Both boundaries are async suspension points: the prompt is a modal
//! choice awaiting user input, the roller may be a remote dice service.
//! Neither has a timeout of its own; a prompt implementation that times out
//! should report [`ExplodeChoice::Cancel`] / [`RerollChoice::Cancel`].

use async_trait::async_trait;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use kw_dice::{Category, Die, DieTerm};

use crate::stack::OptionStack;

/// Outcome of an explosion prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplodeChoice {
    /// A concrete selection of `count` dice from one stack entry.
    Pick {
        /// Category of the chosen entry.
        category: Category,
        /// Die type of the chosen entry.
        die: Die,
        /// How many dice to explode (must be `1..=budget`).
        count: u32,
    },
    /// The user made no selection (empty or zero count).
    Pass,
    /// The prompt was cancelled or closed.
    Cancel,
}

/// Outcome of a reroll prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RerollChoice {
    /// Reroll one die of the chosen entry currently showing `value`.
    Pick {
        /// Category of the chosen entry.
        category: Category,
        /// Die type of the chosen entry.
        die: Die,
        /// The rolled value the chosen die currently shows.
        value: u32,
    },
    /// The prompt was cancelled or closed.
    Cancel,
}

/// Presents labeled options to the deciding party.
///
/// UI-agnostic: the host renders the stack however it likes (the original
/// macros use a modal table with radio buttons and a count field).
#[async_trait]
pub trait DecisionPrompt: Send {
    /// Offer the stack for an explosion selection, capped by `budget`.
    async fn choose_explosion(&mut self, stack: &OptionStack, budget: u32) -> ExplodeChoice;

    /// Offer the stack for a reroll selection.
    async fn choose_reroll(&mut self, stack: &OptionStack) -> RerollChoice;
}

/// Rolls fresh dice on behalf of the resolution loops.
#[async_trait]
pub trait DieRoller: Send {
    /// Roll `count` dice of the given type, tagged with `category`.
    async fn roll_term(&mut self, die: Die, count: u32, category: Option<Category>) -> DieTerm;
}

/// A [`DieRoller`] backed by a local RNG. Deterministic when seeded.
#[derive(Debug)]
pub struct RngRoller {
    rng: StdRng,
}

impl RngRoller {
    /// A roller seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A deterministic roller for reproducible resolution.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

#[async_trait]
impl DieRoller for RngRoller {
    async fn roll_term(&mut self, die: Die, count: u32, category: Option<Category>) -> DieTerm {
        let results = (0..count)
            .map(|_| self.rng.random_range(1..=die.sides()))
            .collect();
        DieTerm::new(die, category, results)
    }
}
