//! # Queued items awaiting admission.

use crate::jobs::JobName;
use crate::verdict::{BlockReason, Verdict};

/// A pending unit of work awaiting admission.
///
/// Created by the host queue when work is submitted; the dispatcher records
/// its most recent verdict on the item via
/// [`Dispatcher::poll`](crate::Dispatcher::poll) so the queue can display
/// why an item is being held. `Option<BlockReason>` carries the invariant
/// that a reason exists exactly when the item is blocked.
///
/// ## Example
/// ```rust
/// use jobgate::QueuedItem;
///
/// let item = QueuedItem::new("ci/build");
/// assert!(!item.is_blocked());
/// assert_eq!(item.block_reason(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedItem {
    task: JobName,
    blocked: Option<BlockReason>,
}

impl QueuedItem {
    /// Creates an item for the given task, not blocked.
    pub fn new(task: impl Into<JobName>) -> Self {
        Self {
            task: task.into(),
            blocked: None,
        }
    }

    /// Identity of the job this item would run.
    pub fn task(&self) -> &JobName {
        &self.task
    }

    /// True when the most recent poll blocked this item.
    pub fn is_blocked(&self) -> bool {
        self.blocked.is_some()
    }

    /// Reason from the most recent blocking poll, if any.
    pub fn block_reason(&self) -> Option<&BlockReason> {
        self.blocked.as_ref()
    }

    /// Records a verdict on the item (dispatcher-internal).
    pub(crate) fn record(&mut self, verdict: &Verdict) {
        self.blocked = verdict.reason().cloned();
    }
}
