//! Scope matching data model

use serde::{Deserialize, Serialize};

use crate::rating::Confidence;

/// Identifier of a factor definition
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactorId(pub String);

impl FactorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FactorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for FactorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one scoped factor assessment
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub String);

impl InstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<&str> for InstanceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A (domain, system, team) triple; `None` in a dimension means "generic"
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactorScope {
    pub domain: Option<String>,
    pub system: Option<String>,
    pub team: Option<String>,
}

impl FactorScope {
    /// Scope with every dimension unset
    pub fn generic() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn is_generic(&self) -> bool {
        self.domain.is_none() && self.system.is_none() && self.team.is_none()
    }
}

/// A scoped factor assessment; read-only during matching
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FactorInstance {
    pub instance_id: InstanceId,
    pub factor_id: FactorId,
    pub scope: FactorScope,
    pub value: f64,
    pub confidence: Confidence,
}

/// How precisely an instance's scope matched the needed scope
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Every dimension matched or was not needed
    Exact,
    /// A generic instance usable as a fallback (score >= 0.6)
    GenericFallback,
    /// Weak match
    Partial,
}

impl MatchType {
    /// Derive the match type from a match score
    pub fn from_score(score: f64) -> Self {
        if score >= 1.0 - 1e-9 {
            Self::Exact
        } else if score >= 0.6 {
            Self::GenericFallback
        } else {
            Self::Partial
        }
    }
}

/// One ranked match result
#[derive(Clone, Debug, Serialize)]
pub struct ScopeMatch {
    pub instance: FactorInstance,
    pub score: f64,
    pub match_type: MatchType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_scope() {
        assert!(FactorScope::generic().is_generic());
        assert!(!FactorScope::generic().with_domain("sales").is_generic());
    }

    #[test]
    fn test_match_type_thresholds() {
        assert_eq!(MatchType::from_score(1.0), MatchType::Exact);
        assert_eq!(MatchType::from_score(0.87), MatchType::GenericFallback);
        assert_eq!(MatchType::from_score(0.6), MatchType::GenericFallback);
        assert_eq!(MatchType::from_score(0.59), MatchType::Partial);
    }
}
