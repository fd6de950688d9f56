//! # Condition kind registry.
//!
//! Kinds are registered explicitly, at startup, by whoever assembles the
//! host process — no runtime plugin discovery. The registry maps a stored
//! kind tag to a factory that turns [`ConditionSpec`] parameters into a
//! live [`ConditionRef`].
//!
//! ## Rules
//! - An unknown kind tag is a deployment defect, not a user mistake; it
//!   surfaces as [`GateError::UnknownKind`] when materializing the chain,
//!   before the chain ever reaches the admission path.
//! - Factories are lenient about *values* (an empty target builds and then
//!   blocks with a visible reason) but strict about *shape* (parameters
//!   that do not deserialize are [`GateError::BadParams`]).

use std::collections::HashMap;

use serde_json::Value;
use tracing::error;

use crate::conditions::building::BuildingCondition;
use crate::conditions::chain::ConditionChain;
use crate::conditions::condition::ConditionRef;
use crate::conditions::result::ResultCondition;
use crate::conditions::spec::ConditionSpec;
use crate::error::GateError;

type BoxedFactory = Box<dyn Fn(&Value) -> Result<ConditionRef, GateError> + Send + Sync>;

/// Registry of condition kinds known to this process.
///
/// ## Example
/// ```rust
/// use jobgate::{ConditionRegistry, ConditionSpec};
/// use serde_json::json;
///
/// let registry = ConditionRegistry::builtin();
/// let chain = registry
///     .build_chain(&[
///         ConditionSpec::new("building", json!({ "target": "deploy" })),
///         ConditionSpec::new("last-result", json!({ "target": "deploy" })),
///     ])
///     .unwrap();
/// assert_eq!(chain.len(), 2);
/// ```
pub struct ConditionRegistry {
    factories: HashMap<String, BoxedFactory>,
}

impl ConditionRegistry {
    /// Creates a registry with no kinds registered.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in kinds registered:
    /// [`BuildingCondition`] (`"building"`) and [`ResultCondition`]
    /// (`"last-result"`).
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(BuildingCondition::KIND, BuildingCondition::from_params);
        registry.register(ResultCondition::KIND, ResultCondition::from_params);
        registry
    }

    /// Registers a factory for `kind`, replacing any previous registration.
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn(&Value) -> Result<ConditionRef, GateError> + Send + Sync + 'static,
    {
        self.factories.insert(kind.into(), Box::new(factory));
    }

    /// Registered kind tags, sorted. For hosts enumerating available kinds
    /// in configuration UIs.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Materializes one stored spec into a live condition.
    pub fn build(&self, spec: &ConditionSpec) -> Result<ConditionRef, GateError> {
        let Some(factory) = self.factories.get(&spec.kind) else {
            error!(kind = %spec.kind, "condition kind is not registered");
            return Err(GateError::UnknownKind {
                kind: spec.kind.clone(),
            });
        };
        factory(&spec.params)
    }

    /// Materializes a stored chain, preserving spec order.
    ///
    /// Fails on the first spec that cannot be built; a chain is replaced
    /// wholesale or not at all.
    pub fn build_chain(&self, specs: &[ConditionSpec]) -> Result<ConditionChain, GateError> {
        specs.iter().map(|spec| self.build(spec)).collect()
    }
}

impl Default for ConditionRegistry {
    /// Returns [`ConditionRegistry::builtin`].
    fn default() -> Self {
        Self::builtin()
    }
}
