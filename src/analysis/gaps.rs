//! Quality gap severity bucketing

use serde::{Deserialize, Serialize};

/// Severity bucket for a quality gap
///
/// Boundary values belong to the lower bucket: a gap of exactly 1.0 is
/// still minor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapSeverity {
    None,
    Minor,
    Moderate,
    Significant,
    Critical,
}

/// Bucket a gap (required minus current quality) into a severity
pub fn gap_severity(gap: f64) -> GapSeverity {
    if gap <= 0.0 {
        GapSeverity::None
    } else if gap <= 1.0 {
        GapSeverity::Minor
    } else if gap <= 2.0 {
        GapSeverity::Moderate
    } else if gap <= 3.0 {
        GapSeverity::Significant
    } else {
        GapSeverity::Critical
    }
}

/// Whole stars needed to close a gap
///
/// Rounds ties away from zero (`f64::round`): a gap of exactly 2.5
/// displays as 3 stars.
pub fn gap_stars(gap: f64) -> i64 {
    gap.round() as i64
}

/// Gap against a required quality level
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GapSummary {
    pub gap: f64,
    pub gap_stars: i64,
    pub severity: GapSeverity,
}

pub fn gap_summary(gap: f64) -> GapSummary {
    GapSummary {
        gap,
        gap_stars: gap_stars(gap),
        severity: gap_severity(gap),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_boundaries() {
        assert_eq!(gap_severity(0.0), GapSeverity::None);
        assert_eq!(gap_severity(-0.5), GapSeverity::None);
        assert_eq!(gap_severity(1.0), GapSeverity::Minor);
        assert_eq!(gap_severity(1.01), GapSeverity::Moderate);
        assert_eq!(gap_severity(2.0), GapSeverity::Moderate);
        assert_eq!(gap_severity(2.5), GapSeverity::Significant);
        assert_eq!(gap_severity(3.0), GapSeverity::Significant);
        assert_eq!(gap_severity(3.5), GapSeverity::Critical);
    }

    #[test]
    fn test_gap_stars_rounds_ties_away_from_zero() {
        assert_eq!(gap_stars(0.4), 0);
        assert_eq!(gap_stars(0.5), 1);
        assert_eq!(gap_stars(2.5), 3);
        assert_eq!(gap_stars(1.2), 1);
    }

    #[test]
    fn test_gap_summary() {
        let summary = gap_summary(1.5);
        assert_eq!(summary.gap, 1.5);
        assert_eq!(summary.gap_stars, 2);
        assert_eq!(summary.severity, GapSeverity::Moderate);
    }
}
