//! # Host-supplied read view over jobs, runs, and attached chains.
//!
//! The admission core never owns job state. Everything it needs — name
//! resolution, run history, per-job chain configuration — arrives through
//! [`JobRegistry`], a capability object the host passes in explicitly
//! (no ambient global lookup).
//!
//! ## Contract
//! - All accessors are reads; implementations must be safe under concurrent
//!   calls from the host's scheduling loop.
//! - Accessors return snapshots by value: a condition reads once and decides,
//!   so the registry may change underneath it without tearing a verdict.
//! - Lookups are in-memory; no I/O on the admission hot path.

use crate::conditions::ConditionChain;
use crate::jobs::name::JobName;
use crate::jobs::run::RunInfo;

/// Outcome of a namespace-aware name lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// The name resolved to a job; carries the job's full name.
    Job(JobName),
    /// Nothing with that name exists in the namespace.
    NotFound,
    /// The name exists but is not a job; carries the entity kind, e.g. `"folder"`.
    WrongType(String),
}

/// Read-only view over the host's jobs, used by conditions and the dispatcher.
///
/// Implement this once per host; [`MemoryRegistry`](crate::MemoryRegistry)
/// is a ready-made in-process implementation.
pub trait JobRegistry: Send + Sync {
    /// Resolves `target` relative to `scope`'s parent namespace.
    ///
    /// Scoping follows [`JobName::sibling`]: plain names are siblings of
    /// `scope`, a leading `/` makes the name absolute.
    fn resolve(&self, target: &str, scope: &JobName) -> Resolved;

    /// Snapshot of the most recent run of `job` (executing or completed),
    /// or `None` when the job has never run.
    fn last_run(&self, job: &JobName) -> Option<RunInfo>;

    /// Snapshot of the run currently executing for `job`, if any.
    fn current_run(&self, job: &JobName) -> Option<RunInfo>;

    /// The condition chain attached to `job`, when admission gating is
    /// enabled for it. `None` means the dispatcher defers (no opinion).
    fn attached_chain(&self, job: &JobName) -> Option<ConditionChain>;
}
