//! # Ordered condition chains.
//!
//! A chain is the per-job list of conditions the dispatcher folds over,
//! strictly left to right, first match wins. Order is load-bearing
//! configuration: an unblock ahead of a would-be block wins, and vice
//! versa. The chain therefore preserves attachment order exactly and is
//! replaced wholesale on reconfiguration, never partially mutated.

use std::fmt;
use std::sync::Arc;

use crate::conditions::condition::{Condition, ConditionRef};

/// Ordered sequence of conditions attached to one job.
///
/// An empty chain means "no restriction": the dispatcher allows without
/// consulting anything.
///
/// ## Example
/// ```rust
/// use jobgate::{BuildingCondition, ConditionChain};
///
/// let chain = ConditionChain::new().with(BuildingCondition::new("deploy"));
/// assert_eq!(chain.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct ConditionChain {
    conditions: Vec<ConditionRef>,
}

impl ConditionChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a condition, consuming and returning the chain.
    pub fn with(mut self, condition: impl Condition + 'static) -> Self {
        self.conditions.push(Arc::new(condition));
        self
    }

    /// Appends an already-shared condition handle.
    pub fn push(&mut self, condition: ConditionRef) {
        self.conditions.push(condition);
    }

    /// Number of conditions in the chain.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// True when no conditions are attached.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Iterates conditions in attachment order.
    pub fn iter(&self) -> impl Iterator<Item = &ConditionRef> {
        self.conditions.iter()
    }
}

impl From<Vec<ConditionRef>> for ConditionChain {
    fn from(conditions: Vec<ConditionRef>) -> Self {
        Self { conditions }
    }
}

impl FromIterator<ConditionRef> for ConditionChain {
    fn from_iter<I: IntoIterator<Item = ConditionRef>>(iter: I) -> Self {
        Self {
            conditions: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for ConditionChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.conditions.iter().map(|c| c.kind()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::building::BuildingCondition;
    use crate::conditions::result::ResultCondition;

    #[test]
    fn chain_preserves_attachment_order() {
        let chain = ConditionChain::new()
            .with(ResultCondition::with_default_threshold("a"))
            .with(BuildingCondition::new("b"));

        let kinds: Vec<&str> = chain.iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec!["last-result", "building"]);
    }

    #[test]
    fn debug_lists_kinds() {
        let chain = ConditionChain::new().with(BuildingCondition::new("b"));
        assert_eq!(format!("{chain:?}"), r#"["building"]"#);
    }
}
