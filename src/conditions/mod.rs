//! Admission conditions: the trait, the built-in kinds, and the chain/registry
//! plumbing that turns stored configuration into live predicates.

mod building;
mod chain;
mod condition;
mod registry;
mod result;
mod spec;

pub use building::BuildingCondition;
pub use chain::ConditionChain;
pub use condition::{Condition, ConditionRef};
pub use registry::ConditionRegistry;
pub use result::ResultCondition;
pub use spec::ConditionSpec;
