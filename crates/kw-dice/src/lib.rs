//! Dice pool model for Kettenwurf.
//!
//! A [`DicePool`] is the aggregate set of already-rolled dice backing one
//! resolved action: an ordered sequence of [`DieTerm`]s and constant
//! modifiers, plus a running total and a formula rendering that stay in
//! lockstep with the terms. Pools arrive pre-rolled from a host engine and
//! are modified only through explicit splice operations.

pub mod error;
pub mod pool;
pub mod term;

pub use error::{PoolError, PoolResult};
pub use pool::{DicePool, PoolTerm};
pub use term::DieTerm;

use serde::{Deserialize, Serialize};

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// Percentile die (1-100).
    D100,
    /// A die with a custom number of sides (including d2, which has no
    /// dedicated variant).
    Custom(u32),
}

impl Die {
    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
            Self::Custom(n) => n,
        }
    }

    /// Build a die from a side count, preferring the named variants.
    /// Returns `None` for side counts below 2.
    pub fn with_sides(sides: u32) -> Option<Self> {
        match sides {
            0 | 1 => None,
            4 => Some(Self::D4),
            6 => Some(Self::D6),
            8 => Some(Self::D8),
            10 => Some(Self::D10),
            12 => Some(Self::D12),
            20 => Some(Self::D20),
            100 => Some(Self::D100),
            n => Some(Self::Custom(n)),
        }
    }

    /// Parse a die from a string like "d20", "d6", "d100".
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let num = s.strip_prefix('d')?.parse::<u32>().ok()?;
        Self::with_sides(num)
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// A damage or effect category attached to a die term.
///
/// Categories are opaque labels owned by the host ruleset ("fire",
/// "piercing"). A term may omit its category, in which case it resolves to
/// the pool's default category exactly once, at classification time.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Category {
    /// No category recorded — resolves to the pool default.
    #[default]
    Untyped,
    /// A named category label.
    Named(String),
}

impl Category {
    /// Convenience constructor for a named category.
    pub fn named(label: impl Into<String>) -> Self {
        Self::Named(label.into())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Untyped => write!(f, "untyped"),
            Self::Named(s) => write!(f, "{s}"),
        }
    }
}
