//! Force policy for the budgeted selection loop.

/// How the explosion loop reacts to trivial or declined selections.
///
/// Passed explicitly into the loop at call time so each macro's policy stays
/// local to its call site rather than living in ambient configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForcePolicy {
    /// Skip the prompt when the stack offers exactly one option, selecting
    /// it at the largest count the budget allows.
    pub auto_select_single: bool,
    /// Re-prompt after a declined (empty) selection instead of stopping.
    /// A cancellation still stops the loop regardless.
    pub require_full_spend: bool,
}

impl ForcePolicy {
    /// Enable auto-selection of a sole option.
    pub fn with_auto_select_single(mut self) -> Self {
        self.auto_select_single = true;
        self
    }

    /// Enable re-prompting on declined selections.
    pub fn with_require_full_spend(mut self) -> Self {
        self.require_full_spend = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_permissive() {
        let policy = ForcePolicy::default();
        assert!(!policy.auto_select_single);
        assert!(!policy.require_full_spend);
    }

    #[test]
    fn builder_methods() {
        let policy = ForcePolicy::default()
            .with_auto_select_single()
            .with_require_full_spend();
        assert!(policy.auto_select_single);
        assert!(policy.require_full_spend);
    }
}
