//! # Run snapshots and the result severity scale.
//!
//! Conditions look at one run snapshot per evaluation and decide from it
//! alone; they never re-read mid-decision, so a target job finishing halfway
//! through an admission check cannot produce a torn verdict.
//!
//! The severity scale is ordered worst-last: `SUCCESS < UNSTABLE < FAILURE`.
//! "Worse or equal" comparisons against a configured threshold drive
//! [`ResultCondition`](crate::ResultCondition).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordered result severity of a completed run.
///
/// Derived `Ord` follows declaration order, so `Failure` is the worst.
///
/// ## Example
/// ```rust
/// use jobgate::Severity;
///
/// assert!(Severity::Failure > Severity::Unstable);
/// assert!(Severity::Unstable.is_worse_or_equal(Severity::Unstable));
/// assert!(!Severity::Success.is_worse_or_equal(Severity::Unstable));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// The run completed cleanly.
    Success,
    /// The run completed with problems (e.g. test failures) but produced output.
    Unstable,
    /// The run failed outright.
    Failure,
}

impl Severity {
    /// True when `self` is at or beyond `threshold` on the scale.
    #[inline]
    pub fn is_worse_or_equal(self, threshold: Severity) -> bool {
        self >= threshold
    }

    /// Uppercase display form, matching the host-facing wire/UI spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "SUCCESS",
            Severity::Unstable => "UNSTABLE",
            Severity::Failure => "FAILURE",
        }
    }

    /// All severities in order, best first. For hosts enumerating valid
    /// threshold values in configuration UIs.
    pub fn all() -> [Severity; 3] {
        [Severity::Success, Severity::Unstable, Severity::Failure]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a severity from its string form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown severity: {0}")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUCCESS" => Ok(Severity::Success),
            "UNSTABLE" => Ok(Severity::Unstable),
            "FAILURE" => Ok(Severity::Failure),
            other => Err(ParseSeverityError(other.to_string())),
        }
    }
}

/// Read-only snapshot of one run of a job.
///
/// Supplied by the host's [`JobRegistry`](crate::JobRegistry). `result` is
/// only meaningful once `executing` is false; an in-flight run carries
/// `result: None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInfo {
    /// Display name of the run, e.g. `"#42"`.
    pub display_name: String,
    /// True while the run is still executing.
    pub executing: bool,
    /// Terminal result, set once the run completes.
    pub result: Option<Severity>,
}

impl RunInfo {
    /// Snapshot of a run still in flight.
    pub fn running(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            executing: true,
            result: None,
        }
    }

    /// Snapshot of a completed run with its terminal result.
    pub fn completed(display_name: impl Into<String>, result: Severity) -> Self {
        Self {
            display_name: display_name.into(),
            executing: false,
            result: Some(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_orders_worst_last() {
        assert!(Severity::Success < Severity::Unstable);
        assert!(Severity::Unstable < Severity::Failure);
    }

    #[test]
    fn worse_or_equal_includes_equal() {
        assert!(Severity::Unstable.is_worse_or_equal(Severity::Unstable));
        assert!(Severity::Failure.is_worse_or_equal(Severity::Unstable));
        assert!(!Severity::Success.is_worse_or_equal(Severity::Unstable));
    }

    #[test]
    fn parse_round_trips_display() {
        for severity in Severity::all() {
            assert_eq!(severity.as_str().parse::<Severity>().unwrap(), severity);
        }
        assert!("success".parse::<Severity>().is_err());
    }

    #[test]
    fn running_snapshot_has_no_result() {
        let run = RunInfo::running("#7");
        assert!(run.executing);
        assert_eq!(run.result, None);
    }
}
