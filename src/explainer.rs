//! Factor explanation
//!
//! Turns the raw factor vector into human-meaningful findings for
//! counselors: which factors drive the risk (with a templated description
//! and a fixed recommendation), and which protective factors offset it.

use crate::config::EngineConfig;
use crate::records::{SocialEmotionalProfile, TalentProfile};
use crate::types::{FactorKind, FactorScores, FindingSeverity, ProtectiveFactor, RiskFactorFinding};

/// Explainer for ranking risk and protective factors
pub struct FactorExplainer;

impl FactorExplainer {
    /// Select every factor above the inclusion floor and rank the findings
    /// most severe first (ties broken by score descending).
    pub fn key_risk_factors(
        factors: &FactorScores,
        config: &EngineConfig,
    ) -> Vec<RiskFactorFinding> {
        let thresholds = &config.findings;
        let mut findings: Vec<RiskFactorFinding> = factors
            .named()
            .into_iter()
            .filter(|(_, score)| *score > thresholds.key_factor_floor)
            .map(|(factor, score)| {
                let severity = if score > thresholds.critical {
                    FindingSeverity::Critical
                } else if score > thresholds.high {
                    FindingSeverity::High
                } else {
                    FindingSeverity::Medium
                };
                RiskFactorFinding {
                    factor,
                    score,
                    severity,
                    description: describe(factor, score),
                    recommendation: recommendation(factor).to_string(),
                }
            })
            .collect();

        findings.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then(b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal))
        });
        findings
    }

    /// Pull protective factors from the talent and social-emotional
    /// snapshots. Inclusion only, no severity ranking; strength is the
    /// simple level x 2 score.
    pub fn protective_factors(
        talents: Option<&TalentProfile>,
        social_emotional: Option<&SocialEmotionalProfile>,
        config: &EngineConfig,
    ) -> Vec<ProtectiveFactor> {
        let mut protective = Vec::new();

        if let Some(talents) = talents {
            if !talents.creative_talents.is_empty() {
                protective.push(ProtectiveFactor {
                    label: format!("Creative talents: {}", talents.creative_talents.join(", ")),
                    strength: talents.creative_talents.len() as f64 * 2.0,
                });
            }
            if !talents.physical_talents.is_empty() {
                protective.push(ProtectiveFactor {
                    label: format!("Physical talents: {}", talents.physical_talents.join(", ")),
                    strength: talents.physical_talents.len() as f64 * 2.0,
                });
            }
        }

        if let Some(profile) = social_emotional {
            let floor = config.findings.protective_level;
            if profile.leadership >= floor {
                protective.push(ProtectiveFactor {
                    label: "Strong leadership skills".to_string(),
                    strength: profile.leadership as f64 * 2.0,
                });
            }
            if profile.empathy >= floor {
                protective.push(ProtectiveFactor {
                    label: "High empathy".to_string(),
                    strength: profile.empathy as f64 * 2.0,
                });
            }
        }

        protective
    }
}

/// Templated description interpolating the factor score as a percentage
fn describe(factor: FactorKind, score: f64) -> String {
    let pct = (score * 100.0).round() as i64;
    match factor {
        FactorKind::Academic => {
            format!("Academic performance signals elevated risk ({pct}% of maximum)")
        }
        FactorKind::Behavioral => {
            format!("Recent behavior incidents signal elevated risk ({pct}% of maximum)")
        }
        FactorKind::Attendance => {
            format!("Absences and tardies signal elevated risk ({pct}% of maximum)")
        }
        FactorKind::SocialEmotional => {
            format!("Social-emotional indicators signal elevated risk ({pct}% of maximum)")
        }
        FactorKind::FamilySupport => {
            format!("Family support indicators signal elevated risk ({pct}% of maximum)")
        }
        FactorKind::PeerRelations => {
            format!("Peer relationship indicators signal elevated risk ({pct}% of maximum)")
        }
        FactorKind::Motivation => {
            format!("Motivation indicators signal elevated risk ({pct}% of maximum)")
        }
        FactorKind::Health => {
            format!("Health indicators signal elevated risk ({pct}% of maximum)")
        }
    }
}

/// Fixed per-factor recommendation shown alongside the finding
fn recommendation(factor: FactorKind) -> &'static str {
    match factor {
        FactorKind::Academic => "Arrange subject-level tutoring and review recent exam results",
        FactorKind::Behavioral => "Schedule a behavioral consultation and agree on clear expectations",
        FactorKind::Attendance => "Contact the family to identify attendance barriers",
        FactorKind::SocialEmotional => "Refer to the school counselor for social-emotional support",
        FactorKind::FamilySupport => "Plan a family meeting and connect with support services",
        FactorKind::PeerRelations => "Facilitate structured group activities to build peer bonds",
        FactorKind::Motivation => "Set small achievable goals and celebrate incremental progress",
        FactorKind::Health => "Coordinate with the school nurse and the family physician",
    }
}
