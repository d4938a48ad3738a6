//! Risk aggregation
//!
//! Combines the eight factor scores into a single overall score, a
//! categorical risk level, and a confidence measure. Aggregation is a pure
//! function of its inputs; it never writes history (that is an explicit
//! commit by the caller).

use crate::config::EngineConfig;
use crate::factors::DomainCoverage;
use crate::types::{FactorScores, RiskLevel};

/// Aggregated risk picture before explanation is attached
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateRisk {
    /// Weighted sum of the factor scores, clamped to [0, 1]
    pub overall_score: f64,
    pub risk_level: RiskLevel,
    /// Populated source domains out of 8, as a 0-100 percentage
    pub confidence: f64,
}

/// Aggregator for combining factor scores
pub struct RiskAggregator;

impl RiskAggregator {
    /// Combine factor scores into an overall score, level, and confidence.
    ///
    /// `overallScore = sum(weight_i x factor_i)` with the fixed weight table
    /// from the configuration; the level is a pure function of the score.
    pub fn aggregate(
        factors: &FactorScores,
        coverage: DomainCoverage,
        config: &EngineConfig,
    ) -> AggregateRisk {
        let weights = &config.weights;
        let overall_score = (weights.academic * factors.academic
            + weights.behavioral * factors.behavioral
            + weights.attendance * factors.attendance
            + weights.social_emotional * factors.social_emotional
            + weights.family_support * factors.family_support
            + weights.peer_relations * factors.peer_relations
            + weights.motivation * factors.motivation
            + weights.health * factors.health)
            .clamp(0.0, 1.0);

        AggregateRisk {
            overall_score,
            risk_level: RiskLevel::from_score(overall_score, &config.levels),
            confidence: confidence(coverage),
        }
    }
}

/// Confidence as the share of the eight source domains that returned data
pub fn confidence(coverage: DomainCoverage) -> f64 {
    coverage.count() as f64 / 8.0 * 100.0
}
