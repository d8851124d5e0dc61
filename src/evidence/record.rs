//! Evidence records attached to factor edges
//!
//! Each record captures one tiered observation. The list on an edge is
//! append-only; the edge's aggregate score is always recomputed over the
//! full list, never patched incrementally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rating::{Score, Tier};

/// One evidence observation for a factor edge
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    /// Free-text statement the tier/score were derived from
    pub statement: String,
    /// Reliability tier, 1 (weak) to 5 (strong)
    pub tier: Tier,
    /// Raw quality judgment for this observation
    pub score: Score,
    /// Conversation the statement came from, if any
    pub conversation_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl EvidenceRecord {
    pub fn new(
        statement: impl Into<String>,
        tier: Tier,
        score: Score,
        conversation_id: Option<String>,
    ) -> Self {
        Self {
            statement: statement.into(),
            tier,
            score,
            conversation_id,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = EvidenceRecord::new(
            "Forecast accuracy measured at 72% last quarter",
            Tier::new(4).unwrap(),
            Score::new(2.0).unwrap(),
            Some("conv-1".to_string()),
        );
        assert_eq!(record.tier.get(), 4);
        assert_eq!(record.score.get(), 2.0);
        assert_eq!(record.conversation_id.as_deref(), Some("conv-1"));
    }
}
