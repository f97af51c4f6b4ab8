//! Error types for pool operations.

use crate::Die;

/// Errors that can occur when constructing or splicing a dice pool.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// A die was declared with fewer than two sides.
    #[error("die must have at least 2 sides, got {0}")]
    InvalidDie(u32),

    /// A rolled result lies outside the die's face range.
    #[error("result {value} out of range for {die}")]
    ResultOutOfRange {
        /// The die whose range was violated.
        die: Die,
        /// The offending result value.
        value: u32,
    },

    /// A term index does not exist in the pool.
    #[error("no term at index {0}")]
    TermIndexOutOfRange(usize),

    /// The addressed term is a constant modifier, not a dice term.
    #[error("term at index {0} is not a dice term")]
    NotADiceTerm(usize),

    /// A die index does not exist within the addressed term.
    #[error("term {term} has no die at index {die_index}")]
    DieIndexOutOfRange {
        /// Index of the term in the pool.
        term: usize,
        /// Index of the die within the term.
        die_index: usize,
    },
}

/// Convenience result type for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;
