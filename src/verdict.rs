//! # Admission verdicts and blocking reasons.
//!
//! Every admission check folds down to a single [`Verdict`]: either the
//! queued item may run now ([`Verdict::Allow`]) or it stays in the queue
//! with a [`BlockReason`] the host can show to operators.
//!
//! ## Rules
//! - Misconfiguration is a *reason to block*, never a failure of the
//!   admission path itself: a condition with a missing or unresolvable
//!   target reports [`BlockReason::ConfigMissing`] /
//!   [`BlockReason::TargetNotFound`] / [`BlockReason::TargetWrongType`]
//!   instead of returning an error.
//! - A blocked item carries exactly one reason: the first condition in the
//!   chain to take a position wins, later opinions are never consulted.
//!
//! ## Example
//! ```rust
//! use jobgate::{BlockReason, Verdict};
//!
//! let verdict = Verdict::Block(BlockReason::TargetNotFound {
//!     kind: "building",
//!     target: "deploy".into(),
//! });
//!
//! assert!(verdict.is_blocked());
//! let reason = verdict.reason().unwrap();
//! assert_eq!(reason.as_label(), "target_not_found");
//! assert_eq!(reason.to_string(), "building condition: job deploy does not exist");
//! ```

use thiserror::Error;

use crate::jobs::Severity;

/// Why a queued item is being kept out of execution right now.
///
/// The first two groups are configuration defects surfaced to the user
/// (the item stays queued until the configuration is fixed); the last two
/// are the conditions' normal blocking outcomes. Custom condition kinds
/// construct these directly, so the enum is deliberately exhaustive and
/// growing it is a breaking change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    /// A field the condition kind requires is empty or unset.
    #[error("{kind} condition: {detail}")]
    ConfigMissing {
        /// Kind tag of the misconfigured condition.
        kind: &'static str,
        /// Which field is missing, e.g. `"target job is not specified"`.
        detail: String,
    },

    /// The configured target name does not resolve to anything.
    #[error("{kind} condition: job {target} does not exist")]
    TargetNotFound {
        /// Kind tag of the condition that performed the lookup.
        kind: &'static str,
        /// The name as configured (pre-resolution).
        target: String,
    },

    /// The configured target name resolves to something that is not a job.
    #[error("{kind} condition: {target} is not a job (found {found})")]
    TargetWrongType {
        /// Kind tag of the condition that performed the lookup.
        kind: &'static str,
        /// The name as configured (pre-resolution).
        target: String,
        /// What the name actually points at, e.g. `"folder"`.
        found: String,
    },

    /// The target job's most recent run is still executing.
    #[error("{job} is building: {run}")]
    TargetBuilding {
        /// Full name of the resolved target job.
        job: String,
        /// Display name of the run in flight, e.g. `"#42"`.
        run: String,
    },

    /// The target job's last completed result is at or beyond the threshold.
    #[error("last build of {job} is {result}")]
    ResultAtOrWorse {
        /// Full name of the resolved target job.
        job: String,
        /// The offending result.
        result: Severity,
    },

    /// Free-form reason from a custom condition kind.
    #[error("{0}")]
    Other(String),
}

impl BlockReason {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use jobgate::BlockReason;
    ///
    /// let reason = BlockReason::TargetBuilding { job: "ci/deploy".into(), run: "#7".into() };
    /// assert_eq!(reason.as_label(), "target_building");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BlockReason::ConfigMissing { .. } => "config_missing",
            BlockReason::TargetNotFound { .. } => "target_not_found",
            BlockReason::TargetWrongType { .. } => "target_wrong_type",
            BlockReason::TargetBuilding { .. } => "target_building",
            BlockReason::ResultAtOrWorse { .. } => "result_at_or_worse",
            BlockReason::Other(_) => "other",
        }
    }
}

/// Outcome of one admission check.
///
/// Produced by [`Dispatcher::can_run`](crate::Dispatcher::can_run); not
/// persisted by this crate — the host stores/displays it as it sees fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The item may transition from waiting to running.
    Allow,
    /// The item stays queued, with a human-readable reason.
    Block(BlockReason),
}

impl Verdict {
    /// True when the item may run.
    #[inline]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allow)
    }

    /// True when the item stays queued.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Verdict::Block(_))
    }

    /// The blocking reason, if any.
    pub fn reason(&self) -> Option<&BlockReason> {
        match self {
            Verdict::Allow => None,
            Verdict::Block(reason) => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_strings_name_the_offender() {
        let busy = BlockReason::TargetBuilding {
            job: "ci/deploy".into(),
            run: "#42".into(),
        };
        assert_eq!(busy.to_string(), "ci/deploy is building: #42");

        let severe = BlockReason::ResultAtOrWorse {
            job: "ci/deploy".into(),
            result: Severity::Failure,
        };
        assert_eq!(severe.to_string(), "last build of ci/deploy is FAILURE");
    }

    #[test]
    fn missing_config_mentions_not_specified() {
        let reason = BlockReason::ConfigMissing {
            kind: "building",
            detail: "target job is not specified".into(),
        };
        assert!(reason.to_string().contains("not specified"));
    }
}
