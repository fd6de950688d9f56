//! # jobgate
//!
//! **Jobgate** is an admission-control layer for job queues.
//!
//! Before a queued unit of work transitions from waiting to running, an
//! ordered chain of conditions attached to its job is evaluated. Each
//! condition can force admission, veto it with a human-readable reason, or
//! abstain; the first condition to take a position decides. The crate is
//! designed as a building block: the host queue owns scheduling, execution,
//! and persistence, and hands the gate a read-only view of job state.
//!
//! ## Architecture
//! ```text
//!  host queue (poll loop)                     host job state
//!        │                                          ▲
//!        │ can_run(item)                            │ reads only
//!        ▼                                          │
//! ┌──────────────────┐   attached_chain()   ┌───────┴────────┐
//! │    Dispatcher    │─────────────────────►│  JobRegistry   │
//! │ (first-match-wins│                      │ (host-supplied │
//! │      fold)       │                      │   capability)  │
//! └──────┬───────────┘                      └───────▲────────┘
//!        │ per condition, in attachment order       │
//!        ▼                                          │
//! ┌──────────────────┐  resolve / last_run          │
//! │  ConditionChain  │──────────────────────────────┘
//! │  [building]      │
//! │  [last-result]   │      is_unblocked? → Allow (short-circuit)
//! │  [custom…]       │      is_blocked?   → Block(reason) (short-circuit)
//! └──────────────────┘      neither       → next condition
//! ```
//!
//! ## Features
//! | Area           | Description                                              | Key types / traits                           |
//! |----------------|----------------------------------------------------------|----------------------------------------------|
//! | **Dispatch**   | Fold a chain into one verdict per admission poll.        | [`Dispatcher`], [`Verdict`]                  |
//! | **Conditions** | Built-in and custom admission predicates.                | [`Condition`], [`BuildingCondition`], [`ResultCondition`] |
//! | **Chains**     | Ordered, per-job condition lists (order is contract).    | [`ConditionChain`]                           |
//! | **Config**     | Serde-able stored form + explicit kind registration.     | [`ConditionSpec`], [`ConditionRegistry`]     |
//! | **Jobs**       | Host-facing read view over jobs and runs.                | [`JobRegistry`], [`MemoryRegistry`], [`Severity`] |
//! | **Errors**     | Typed errors for chain materialization only.             | [`GateError`], [`BlockReason`]               |
//!
//! ## Design rules
//! - **Blocked, not broken**: misconfiguration (missing target, name that
//!   resolves to a folder) is a [`Verdict::Block`] with a reason operators
//!   can read, never an error on the admission path.
//! - **Order is configuration**: an earlier unblock overrides a later
//!   would-be block; chains evaluate strictly in attachment order.
//! - **Pure and reentrant**: conditions read a snapshot and decide; no
//!   mutation, no I/O, no state between calls.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use jobgate::{
//!     ConditionRegistry, ConditionSpec, Dispatcher, MemoryRegistry, QueuedItem, Severity,
//! };
//! use serde_json::json;
//!
//! // Host job state: two sibling jobs, "build" gated on "deploy".
//! let jobs = Arc::new(MemoryRegistry::new());
//! jobs.add_job("ci/build");
//! jobs.add_job("ci/deploy");
//!
//! // Chains are persisted by the host as specs; materialize via the registry.
//! let registry = ConditionRegistry::builtin();
//! let chain = registry
//!     .build_chain(&[
//!         ConditionSpec::new("building", json!({ "target": "deploy" })),
//!         ConditionSpec::new("last-result", json!({ "target": "deploy", "threshold": "FAILURE" })),
//!     ])
//!     .unwrap();
//! jobs.attach_chain("ci/build", chain);
//!
//! let gate = Dispatcher::new(jobs.clone());
//! let mut item = QueuedItem::new("ci/build");
//!
//! // deploy is mid-run: the building condition holds the item back.
//! jobs.start_run("ci/deploy", "#12");
//! assert!(gate.poll(&mut item).is_blocked());
//! assert_eq!(item.block_reason().unwrap().to_string(), "ci/deploy is building: #12");
//!
//! // deploy finishes unstable: under the FAILURE threshold, so build runs.
//! jobs.finish_run("ci/deploy", Severity::Unstable);
//! assert!(gate.poll(&mut item).is_allowed());
//! ```

mod conditions;
mod error;
mod jobs;
mod queue;
mod verdict;

// ---- Public re-exports ----

pub use conditions::{
    BuildingCondition, Condition, ConditionChain, ConditionRef, ConditionRegistry, ConditionSpec,
    ResultCondition,
};
pub use error::GateError;
pub use jobs::{JobName, JobRegistry, MemoryRegistry, ParseSeverityError, Resolved, RunInfo, Severity};
pub use queue::{Dispatcher, QueuedItem};
pub use verdict::{BlockReason, Verdict};
