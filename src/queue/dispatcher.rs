//! # Admission dispatcher.
//!
//! The single entry point the host queue calls during its admission poll.
//! For each item about to run, the dispatcher looks up the item's attached
//! condition chain and folds it down to one [`Verdict`], strictly left to
//! right, first match wins:
//!
//! ```text
//! for condition in chain (attachment order):
//!     condition.is_unblocked(item)?   → Allow   (short-circuit)
//!     condition.is_blocked(item)?     → Block   (short-circuit, first reason wins)
//!     otherwise                       → abstain, next condition
//! no condition took a position        → Allow
//! ```
//!
//! ## Rules
//! - An item with no attached chain is not the gate's concern: the
//!   dispatcher allows and leaves the decision to any other admission
//!   checks the host runs.
//! - Evaluation is synchronous, stateless, and reentrant; the dispatcher
//!   holds nothing but a shared registry handle, so concurrent polls over
//!   distinct items need no locking here.
//! - The dispatcher itself never fails; every expected problem is a
//!   [`BlockReason`](crate::BlockReason) produced by some condition.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::conditions::ConditionChain;
use crate::jobs::JobRegistry;
use crate::queue::item::QueuedItem;
use crate::verdict::Verdict;

/// Evaluates attached condition chains into admission verdicts.
///
/// Holds the host's [`JobRegistry`] as an explicit capability — conditions
/// receive it per call and never reach into ambient state.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use jobgate::{
///     ConditionChain, Dispatcher, MemoryRegistry, QueuedItem, ResultCondition, Severity,
/// };
///
/// let jobs = Arc::new(MemoryRegistry::new());
/// jobs.add_job("build");
/// jobs.add_job("deploy");
/// jobs.attach_chain(
///     "build",
///     ConditionChain::new().with(ResultCondition::with_default_threshold("deploy")),
/// );
///
/// let gate = Dispatcher::new(jobs.clone());
/// let item = QueuedItem::new("build");
///
/// // deploy has never run: no opinion, allow.
/// assert!(gate.can_run(&item).is_allowed());
///
/// jobs.start_run("deploy", "#1");
/// jobs.finish_run("deploy", Severity::Failure);
/// assert!(gate.can_run(&item).is_blocked());
/// ```
pub struct Dispatcher {
    jobs: Arc<dyn JobRegistry>,
}

impl Dispatcher {
    /// Creates a dispatcher over the host's job registry.
    pub fn new(jobs: Arc<dyn JobRegistry>) -> Self {
        Self { jobs }
    }

    /// One admission check: may `item` transition from waiting to running?
    ///
    /// Items without an attached chain are allowed without evaluating
    /// anything (gating not configured for that job).
    pub fn can_run(&self, item: &QueuedItem) -> Verdict {
        match self.jobs.attached_chain(item.task()) {
            Some(chain) => self.evaluate(item, &chain),
            None => Verdict::Allow,
        }
    }

    /// Folds `chain` over `item`, first match wins.
    ///
    /// Exposed for hosts that manage chain storage themselves and only want
    /// the evaluation algorithm.
    pub fn evaluate(&self, item: &QueuedItem, chain: &ConditionChain) -> Verdict {
        for condition in chain.iter() {
            if condition.is_unblocked(item, self.jobs.as_ref()) {
                trace!(
                    task = %item.task(),
                    kind = condition.kind(),
                    "condition unblocks item, admitting"
                );
                return Verdict::Allow;
            }
            if let Some(reason) = condition.is_blocked(item, self.jobs.as_ref()) {
                debug!(
                    task = %item.task(),
                    kind = condition.kind(),
                    label = reason.as_label(),
                    %reason,
                    "blocking queued item"
                );
                return Verdict::Block(reason);
            }
        }
        Verdict::Allow
    }

    /// Like [`Dispatcher::can_run`], additionally recording the verdict on
    /// the item so the host can display the blocking reason.
    pub fn poll(&self, item: &mut QueuedItem) -> Verdict {
        let verdict = self.can_run(item);
        item.record(&verdict);
        verdict
    }
}
