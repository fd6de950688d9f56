//! # Core condition trait
//!
//! `Condition` is the extension point for plugging custom admission
//! predicates into the gate. Built-ins cover "target job is building" and
//! "target job's last result is too severe"; hosts add kinds by implementing
//! this trait and registering a factory with
//! [`ConditionRegistry`](crate::ConditionRegistry).
//!
//! ## Contract
//! - Evaluation is a pure read: conditions consult the [`JobRegistry`] and
//!   decide, never mutate anything, never perform I/O.
//! - Malformed configuration is reported through [`Condition::is_blocked`]
//!   as a [`BlockReason`], never through `is_unblocked` and never by
//!   panicking — a misconfigured job stays queued with a visible reason
//!   instead of taking down the admission poll.
//! - Implementations hold no mutable state across calls; the same inputs
//!   must yield the same answer.

use std::sync::Arc;

use crate::jobs::JobRegistry;
use crate::queue::QueuedItem;
use crate::verdict::BlockReason;

/// One pluggable admission predicate.
///
/// The dispatcher asks each condition two questions, in chain order:
/// does it force admission (`is_unblocked`), and does it veto admission
/// (`is_blocked`)? Abstaining on both passes the decision down the chain.
pub trait Condition: Send + Sync {
    /// Stable kind tag, used for registry lookup and log labels.
    fn kind(&self) -> &'static str;

    /// True when this condition forces admission of `item`, overriding any
    /// block this or a later condition would report.
    ///
    /// Default: `false` (abstain). Must be side-effect free and must not
    /// report configuration problems — those belong in [`Condition::is_blocked`].
    fn is_unblocked(&self, item: &QueuedItem, jobs: &dyn JobRegistry) -> bool {
        let _ = (item, jobs);
        false
    }

    /// Reason to keep `item` in the queue right now, or `None` to abstain.
    fn is_blocked(&self, item: &QueuedItem, jobs: &dyn JobRegistry) -> Option<BlockReason>;
}

/// Shared handle to a condition instance.
///
/// Conditions are immutable once built, so chains share them freely.
pub type ConditionRef = Arc<dyn Condition>;
