//! # Stored form of a condition.
//!
//! Chains are persisted by the host's own job-configuration storage; this
//! crate only fixes the shape: a kind tag plus kind-specific parameters as
//! raw JSON. [`ConditionRegistry`](crate::ConditionRegistry) turns stored
//! specs back into live conditions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Serde-friendly description of one condition in a stored chain.
///
/// ## Example
/// ```rust
/// use jobgate::ConditionSpec;
///
/// let spec: ConditionSpec = serde_json::from_str(
///     r#"{ "kind": "last-result", "params": { "target": "deploy", "threshold": "FAILURE" } }"#,
/// ).unwrap();
/// assert_eq!(spec.kind, "last-result");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSpec {
    /// Kind tag, matched against registered factories.
    pub kind: String,

    /// Kind-specific parameters; `null` when the kind takes none.
    #[serde(default)]
    pub params: Value,
}

impl ConditionSpec {
    /// Creates a spec from a kind tag and parameters.
    pub fn new(kind: impl Into<String>, params: Value) -> Self {
        Self {
            kind: kind.into(),
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_default_to_null() {
        let spec: ConditionSpec = serde_json::from_str(r#"{ "kind": "building" }"#).unwrap();
        assert_eq!(spec.params, Value::Null);
    }
}
