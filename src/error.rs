//! Errors raised while materializing condition configuration.
//!
//! The admission path itself never fails: anything a condition can detect at
//! evaluation time is a [`BlockReason`](crate::BlockReason), not an error.
//! [`GateError`] covers the one class of fatal defects the design reserves
//! for real errors — being handed configuration the registry cannot turn
//! into a live condition (unknown kind tag, unparseable parameters).

use thiserror::Error;

/// # Errors produced when building conditions from stored configuration.
///
/// Returned by [`ConditionRegistry::build`](crate::ConditionRegistry::build)
/// and [`ConditionRegistry::build_chain`](crate::ConditionRegistry::build_chain).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum GateError {
    /// The stored kind tag has no registered factory.
    ///
    /// A programming/deployment defect (a kind was persisted that this
    /// process never registered), not a user configuration mistake.
    #[error("unknown condition kind: {kind}")]
    UnknownKind {
        /// The unrecognized kind tag as stored.
        kind: String,
    },

    /// The stored parameters do not deserialize for the given kind.
    #[error("bad parameters for condition kind {kind}: {error}")]
    BadParams {
        /// Kind tag whose factory rejected the parameters.
        kind: String,
        /// Deserialization error text.
        error: String,
    },
}

impl GateError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use jobgate::GateError;
    ///
    /// let err = GateError::UnknownKind { kind: "mystery".into() };
    /// assert_eq!(err.as_label(), "unknown_kind");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            GateError::UnknownKind { .. } => "unknown_kind",
            GateError::BadParams { .. } => "bad_params",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            GateError::UnknownKind { kind } => format!("unknown kind: {kind}"),
            GateError::BadParams { kind, error } => format!("bad params for {kind}: {error}"),
        }
    }
}
