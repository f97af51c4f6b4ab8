//! Error types for the resolution engine.

use thiserror::Error;

use kw_dice::{Category, Die, PoolError};

/// Result type for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors that can occur while resolving an explosion or reroll pass.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A reroll selection no longer matches any die in the pool — the pool
    /// changed between classification and execution. The pool is left
    /// untouched; callers decide whether to reclassify or abort.
    #[error("no {category} {die} showing {value} remains in the pool")]
    StaleSelection {
        /// Category of the selected die.
        category: Category,
        /// Die type of the selected die.
        die: Die,
        /// The result value the selection expected to find.
        value: u32,
    },

    /// A decision outcome that violates the offered options (zero count,
    /// count over budget, or a roller that ignored the request). Aborts the
    /// in-progress iteration only; earlier committed splices are kept.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// A splice operation on the underlying pool failed.
    #[error(transparent)]
    Pool(#[from] PoolError),
}
