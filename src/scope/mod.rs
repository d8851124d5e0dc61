//! Scope matching for factor instances
//!
//! Resolves which stored factor instance applies to a queried
//! (domain, system, team) scope, with specificity-based fallback to more
//! generic instances.

pub mod matcher;
pub mod types;

pub use matcher::{calculate_scope_match, scope_hierarchy, ScopeMatcher};
pub use types::{FactorId, FactorInstance, FactorScope, InstanceId, MatchType, ScopeMatch};
