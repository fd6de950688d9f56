//! # Blocks while another job's latest run is executing.

use std::sync::Arc;

use serde::Deserialize;

use crate::conditions::condition::{Condition, ConditionRef};
use crate::error::GateError;
use crate::jobs::{JobRegistry, Resolved};
use crate::queue::QueuedItem;
use crate::verdict::BlockReason;

/// Blocks a queued item while the configured target job is building.
///
/// Deliberately looks at the *latest* run, which covers both "currently
/// executing" and "just started": parity with hosts where the newest run
/// object reports itself as building until it completes. A target with no
/// runs yet, or whose latest run has completed, yields no opinion.
///
/// Never unblocks.
///
/// ## Example
/// ```rust
/// use jobgate::{BuildingCondition, Condition, MemoryRegistry, QueuedItem};
///
/// let jobs = MemoryRegistry::new();
/// jobs.add_job("build");
/// jobs.add_job("deploy");
/// jobs.start_run("deploy", "#3");
///
/// let condition = BuildingCondition::new("deploy");
/// let item = QueuedItem::new("build");
/// let reason = condition.is_blocked(&item, &jobs).unwrap();
/// assert_eq!(reason.to_string(), "deploy is building: #3");
/// ```
#[derive(Debug, Clone)]
pub struct BuildingCondition {
    target: String,
}

#[derive(Deserialize, Default)]
struct Params {
    // Absent/empty target builds fine and blocks at evaluation time,
    // so a half-filled form degrades to a visible reason, not an error.
    #[serde(default)]
    target: String,
}

impl BuildingCondition {
    /// Registry kind tag for this condition.
    pub const KIND: &'static str = "building";

    /// Creates a condition watching `target` (resolved relative to the
    /// evaluated item's namespace).
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// The configured target name, as stored (pre-resolution).
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Factory for [`ConditionRegistry`](crate::ConditionRegistry).
    ///
    /// Params: `{ "target": "<job name>" }`.
    pub fn from_params(params: &serde_json::Value) -> Result<ConditionRef, GateError> {
        let params: Params = match params {
            serde_json::Value::Null => Params::default(),
            other => serde_json::from_value(other.clone()).map_err(|e| GateError::BadParams {
                kind: Self::KIND.to_string(),
                error: e.to_string(),
            })?,
        };
        Ok(Arc::new(Self::new(params.target)))
    }
}

impl Condition for BuildingCondition {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn is_blocked(&self, item: &QueuedItem, jobs: &dyn JobRegistry) -> Option<BlockReason> {
        // User configured blocking, so don't let a bad configuration slip through.
        if self.target.trim().is_empty() {
            return Some(BlockReason::ConfigMissing {
                kind: Self::KIND,
                detail: "target job is not specified".to_string(),
            });
        }

        match jobs.resolve(&self.target, item.task()) {
            Resolved::Job(job) => {
                let last = jobs.last_run(&job)?;
                if last.executing {
                    Some(BlockReason::TargetBuilding {
                        job: job.to_string(),
                        run: last.display_name,
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
