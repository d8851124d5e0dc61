//! Specificity-based scope matching
//!
//! Each of the three dimensions contributes up to a third of the match
//! score. A set-vs-set mismatch in any dimension disqualifies the
//! instance outright; a generic instance dimension against a set need is
//! usable but scores lower than a precise hit.

use super::types::{FactorId, FactorInstance, FactorScope, MatchType, ScopeMatch};

/// Credit per dimension when it matches or is not needed
const FULL_CREDIT: f64 = 1.0 / 3.0;
/// Credit when the instance is generic in a needed dimension
const PARTIAL_CREDIT: f64 = 0.20;

/// Score how well an instance's scope fits a needed scope, in [0, 1]
///
/// Per dimension: needed unset is full credit ("don't care"); equal
/// values are full credit; an unset instance value against a set need is
/// partial credit; two different set values abort the whole comparison
/// at 0.0. Three full credits return exactly 1.0.
pub fn calculate_scope_match(instance: &FactorScope, needed: &FactorScope) -> f64 {
    let dimensions = [
        (&instance.domain, &needed.domain),
        (&instance.system, &needed.system),
        (&instance.team, &needed.team),
    ];

    let mut score = 0.0;
    let mut full_credits = 0;
    for (instance_value, needed_value) in dimensions {
        match (instance_value, needed_value) {
            (_, None) => {
                score += FULL_CREDIT;
                full_credits += 1;
            }
            (Some(i), Some(n)) if i == n => {
                score += FULL_CREDIT;
                full_credits += 1;
            }
            (None, Some(_)) => score += PARTIAL_CREDIT,
            // Hard mismatch disqualifies regardless of other dimensions
            (Some(_), Some(_)) => return 0.0,
        }
    }

    if full_credits == 3 {
        1.0
    } else {
        score.min(1.0)
    }
}

/// Progressively more generic scopes: self, then team cleared, then
/// system cleared, then domain cleared
pub fn scope_hierarchy(scope: &FactorScope) -> Vec<FactorScope> {
    let mut chain = Vec::with_capacity(4);
    let mut current = scope.clone();
    chain.push(current.clone());
    current.team = None;
    chain.push(current.clone());
    current.system = None;
    chain.push(current.clone());
    current.domain = None;
    chain.push(current);
    chain
}

/// Selects the best-matching factor instance for a queried scope
pub struct ScopeMatcher {
    instances: Vec<FactorInstance>,
}

impl ScopeMatcher {
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
        }
    }

    /// Seed the matcher with candidate instances
    pub fn with_instances(instances: Vec<FactorInstance>) -> Self {
        Self { instances }
    }

    /// Register a scoped assessment instance
    pub fn register(&mut self, instance: FactorInstance) {
        self.instances.push(instance);
    }

    pub fn instances(&self) -> &[FactorInstance] {
        &self.instances
    }

    /// Best-matching instance for a factor and needed scope
    ///
    /// Returns `None` when no candidate survives filtering (wrong factor
    /// or hard scope mismatch).
    pub fn best_match(&self, factor_id: &FactorId, needed: &FactorScope) -> Option<ScopeMatch> {
        self.find_all_matches(factor_id, needed).into_iter().next()
    }

    /// Full ranked match list (used for showing alternatives)
    ///
    /// Sorted by match score descending, then instance confidence
    /// descending; the stable sort keeps registration order on full ties,
    /// so ranking is deterministic.
    pub fn find_all_matches(&self, factor_id: &FactorId, needed: &FactorScope) -> Vec<ScopeMatch> {
        let mut matches: Vec<ScopeMatch> = self
            .instances
            .iter()
            .filter(|i| &i.factor_id == factor_id)
            .filter_map(|instance| {
                let score = calculate_scope_match(&instance.scope, needed);
                if score <= 0.0 {
                    return None;
                }
                Some(ScopeMatch {
                    instance: instance.clone(),
                    score,
                    match_type: MatchType::from_score(score),
                })
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(
                    b.instance
                        .confidence
                        .get()
                        .partial_cmp(&a.instance.confidence.get())
                        .unwrap_or(std::cmp::Ordering::Equal),
                )
        });
        matches
    }
}

impl Default for ScopeMatcher {
    fn default() -> Self {
        Self::new()
    }
}
