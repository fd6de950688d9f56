//! # Blocks on another job's last result.

use std::sync::Arc;

use serde::Deserialize;

use crate::conditions::condition::{Condition, ConditionRef};
use crate::error::GateError;
use crate::jobs::{JobRegistry, Resolved, Severity};
use crate::queue::QueuedItem;
use crate::verdict::BlockReason;

/// Blocks a queued item while the target job's last result is at or beyond
/// a threshold severity.
///
/// The comparison is "worse or equal" on the ordered scale
/// `SUCCESS < UNSTABLE < FAILURE`; the default threshold is
/// [`Severity::Unstable`], so by default both unstable and failed upstream
/// results block. A target with no completed result yet (never ran, or the
/// latest run is still executing) yields no opinion.
///
/// Never unblocks.
///
/// ## Example
/// ```rust
/// use jobgate::{Condition, MemoryRegistry, QueuedItem, ResultCondition, Severity};
///
/// let jobs = MemoryRegistry::new();
/// jobs.add_job("build");
/// jobs.add_job("deploy");
/// jobs.start_run("deploy", "#9");
/// jobs.finish_run("deploy", Severity::Failure);
///
/// let condition = ResultCondition::with_default_threshold("deploy");
/// let item = QueuedItem::new("build");
/// let reason = condition.is_blocked(&item, &jobs).unwrap();
/// assert_eq!(reason.to_string(), "last build of deploy is FAILURE");
/// ```
#[derive(Debug, Clone)]
pub struct ResultCondition {
    target: String,
    threshold: Severity,
}

#[derive(Deserialize)]
struct Params {
    #[serde(default)]
    target: String,
    #[serde(default = "default_threshold")]
    threshold: Severity,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            target: String::new(),
            threshold: default_threshold(),
        }
    }
}

fn default_threshold() -> Severity {
    Severity::Unstable
}

impl ResultCondition {
    /// Registry kind tag for this condition.
    pub const KIND: &'static str = "last-result";

    /// Creates a condition watching `target` with an explicit threshold.
    pub fn new(target: impl Into<String>, threshold: Severity) -> Self {
        Self {
            target: target.into(),
            threshold,
        }
    }

    /// Creates a condition with the stock threshold, [`Severity::Unstable`].
    pub fn with_default_threshold(target: impl Into<String>) -> Self {
        Self::new(target, default_threshold())
    }

    /// The configured target name, as stored (pre-resolution).
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The configured threshold severity.
    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Factory for [`ConditionRegistry`](crate::ConditionRegistry).
    ///
    /// Params: `{ "target": "<job name>", "threshold": "UNSTABLE" }`;
    /// `threshold` defaults to `UNSTABLE` when absent.
    pub fn from_params(params: &serde_json::Value) -> Result<ConditionRef, GateError> {
        let params: Params = match params {
            serde_json::Value::Null => Params::default(),
            other => serde_json::from_value(other.clone()).map_err(|e| GateError::BadParams {
                kind: Self::KIND.to_string(),
                error: e.to_string(),
            })?,
        };
        Ok(Arc::new(Self::new(params.target, params.threshold)))
    }
}

impl Condition for ResultCondition {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn is_blocked(&self, item: &QueuedItem, jobs: &dyn JobRegistry) -> Option<BlockReason> {
        if self.target.trim().is_empty() {
            return Some(BlockReason::ConfigMissing {
                kind: Self::KIND,
                detail: "target job is not specified".to_string(),
            });
        }

        match jobs.resolve(&self.target, item.task()) {
            Resolved::Job(job) => {
                // `result` is only set once a run completes, so an in-flight
                // latest run abstains the same way "never ran" does.
                let last = jobs.last_run(&job)?;
                let result = last.result?;
                if result.is_worse_or_equal(self.threshold) {
                    Some(BlockReason::ResultAtOrWorse {
                        job: job.to_string(),
                        result,
                    })
                } else {
                    None
                }
            }
            Resolved::NotFound => Some(BlockReason::TargetNotFound {
                kind: Self::KIND,
                target: self.target.clone(),
            }),
            Resolved::WrongType(found) => Some(BlockReason::TargetWrongType {
                kind: Self::KIND,
                target: self.target.clone(),
                found,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::MemoryRegistry;

    fn fixture() -> (MemoryRegistry, QueuedItem) {
        let jobs = MemoryRegistry::new();
        jobs.add_job("ci/build");
        jobs.add_job("ci/deploy");
        (jobs, QueuedItem::new("ci/build"))
    }

    fn complete(jobs: &MemoryRegistry, result: Severity) {
        jobs.start_run("ci/deploy", "#1");
        jobs.finish_run("ci/deploy", result);
    }

    #[test]
    fn empty_target_blocks_with_config_reason() {
        let (jobs, item) = fixture();
        let condition = ResultCondition::with_default_threshold("");
        let reason = condition.is_blocked(&item, &jobs).unwrap();
        assert_eq!(reason.as_label(), "config_missing");
    }

    #[test]
    fn result_equal_to_threshold_blocks() {
        let (jobs, item) = fixture();
        complete(&jobs, Severity::Unstable);

        let condition = ResultCondition::new("deploy", Severity::Unstable);
        let reason = condition.is_blocked(&item, &jobs).unwrap();
        assert_eq!(reason.to_string(), "last build of ci/deploy is UNSTABLE");
    }

    #[test]
    fn result_better_than_threshold_abstains() {
        let (jobs, item) = fixture();
        complete(&jobs, Severity::Success);

        let condition = ResultCondition::new("deploy", Severity::Unstable);
        assert_eq!(condition.is_blocked(&item, &jobs), None);
    }

    #[test]
    fn no_completed_runs_abstains() {
        let (jobs, item) = fixture();
        let condition = ResultCondition::with_default_threshold("deploy");

        // Never ran.
        assert_eq!(condition.is_blocked(&item, &jobs), None);

        // Latest run still executing: no result to judge yet.
        jobs.start_run("ci/deploy", "#1");
        assert_eq!(condition.is_blocked(&item, &jobs), None);
    }

    #[test]
    fn missing_target_blocks_and_names_it() {
        let (jobs, item) = fixture();
        let condition = ResultCondition::with_default_threshold("ghost");
        let reason = condition.is_blocked(&item, &jobs).unwrap();
        assert!(reason.to_string().contains("ghost"));
    }

    #[test]
    fn factory_defaults_threshold_to_unstable() {
        let params = serde_json::json!({ "target": "deploy" });
        let built = ResultCondition::from_params(&params).unwrap();
        assert_eq!(built.kind(), "last-result");

        let params = serde_json::json!({ "target": "deploy", "threshold": "FAILURE" });
        assert!(ResultCondition::from_params(&params).is_ok());

        let params = serde_json::json!({ "target": "deploy", "threshold": "bogus" });
        assert!(matches!(
            ResultCondition::from_params(&params),
            Err(GateError::BadParams { .. })
        ));
    }
}
