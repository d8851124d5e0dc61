//! Factorgauge
//!
//! Evidence-weighted quality scoring and bottleneck analysis for business
//! output graphs:
//! - Scope matching: pick the most specific applicable factor instance
//! - Evidence aggregation: tier-weighted Bayesian scoring per factor edge
//! - Graph management: weakest-link output quality composition
//! - Bottleneck analysis: gaps, root causes, remediation ranking

// Module declarations
pub mod analysis;
pub mod config;
pub mod display;
pub mod errors;
pub mod evidence;
pub mod graph;
pub mod rating;
pub mod scope;

// Re-export main types
pub use analysis::{
    gap_severity, gap_stars, gap_summary, solution_recommendations, BottleneckAnalyzer,
    GapSeverity, GapSummary, OutputAnalysis, OutputComparison, OutputStanding, Priority,
    RootCause, SolutionRecommendation,
};

pub use config::{AggregationConfig, InferenceDefaults};

pub use display::format_stars;

pub use errors::{AssessmentError, Result, StorageError};

pub use evidence::{
    aggregate, parse_inference, tier_weight, Aggregate, EdgeAssessment, EvidenceAggregator,
    EvidenceInference, EvidenceRecord, InferenceOutcome,
};

pub use graph::{
    DependencyTopology, Edge, EdgeSummary, EdgeType, GraphId, GraphManager, GraphStore,
    InMemoryGraphStore, Node, NodeId, NodeKind,
};

pub use rating::{Confidence, RatingError, Score, Tier};

pub use scope::{
    calculate_scope_match, scope_hierarchy, FactorId, FactorInstance, FactorScope, InstanceId,
    MatchType, ScopeMatch, ScopeMatcher,
};

/// Version of the assessment core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the assessment core
pub fn init() {
    tracing::info!("Factorgauge v{}", VERSION);
}
