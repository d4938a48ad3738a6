//! Factor score calculators
//!
//! Eight independent, pure functions over a student's recent history, each
//! producing a normalized risk contribution in [0, 1]. The calculators read
//! disjoint data domains and have no ordering dependency on each other.
//!
//! Absence of data yields a documented neutral default, never an error:
//! evidence-based domains (academic, behavioral, attendance, health) default
//! to 0, while the four profile domains default to 0.5 (unknown, not zero).

use crate::config::EngineConfig;
use crate::records::{
    AttendanceRecord, AttendanceStatus, BehaviorIncident, BullyingStatus, ExamResult,
    FamilyContext, FriendCircleSize, HealthProfile, IncidentKind, MotivationProfile, PeerProfile,
    SocialEmotionalProfile, StudentHistory,
};
use crate::types::FactorScores;
use chrono::{Duration, NaiveDate};

/// Neutral default for the profile domains when no snapshot exists
pub const UNKNOWN_PROFILE_RISK: f64 = 0.5;

/// Health risk when chronic conditions are on file
const CHRONIC_CONDITION_RISK: f64 = 0.5;

/// Health risk when only free-text concerns are on file
const HEALTH_CONCERN_RISK: f64 = 0.3;

/// Which of the eight source domains had at least one record.
///
/// Assessment confidence is a pure function of this count; the peer edge
/// table and the risk-history table feed other code paths and do not count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainCoverage {
    pub exams: bool,
    pub incidents: bool,
    pub attendance: bool,
    pub social_emotional: bool,
    pub family: bool,
    pub peer: bool,
    pub motivation: bool,
    pub health: bool,
}

impl DomainCoverage {
    pub fn of(history: &StudentHistory) -> Self {
        Self {
            exams: !history.exams.is_empty(),
            incidents: !history.incidents.is_empty(),
            attendance: !history.attendance.is_empty(),
            social_emotional: history.social_emotional.is_some(),
            family: history.family.is_some(),
            peer: history.peer.is_some(),
            motivation: history.motivation.is_some(),
            health: history.health.is_some(),
        }
    }

    /// Number of populated domains, out of 8
    pub fn count(&self) -> usize {
        [
            self.exams,
            self.incidents,
            self.attendance,
            self.social_emotional,
            self.family,
            self.peer,
            self.motivation,
            self.health,
        ]
        .iter()
        .filter(|populated| **populated)
        .count()
    }
}

/// Calculator for the eight factor scores
pub struct FactorCalculator;

impl FactorCalculator {
    /// Compute all eight factor scores from a student's history.
    ///
    /// `today` anchors the look-back windows; it comes from the injected
    /// clock so the computation stays deterministic under test.
    pub fn compute(history: &StudentHistory, today: NaiveDate, config: &EngineConfig) -> FactorScores {
        FactorScores {
            academic: academic_risk(&history.exams, today, config),
            behavioral: behavioral_risk(&history.incidents, today, config),
            attendance: attendance_risk(&history.attendance, today, config),
            social_emotional: social_emotional_risk(history.social_emotional.as_ref()),
            family_support: family_support_risk(history.family.as_ref()),
            peer_relations: peer_relations_risk(history.peer.as_ref()),
            motivation: motivation_risk(history.motivation.as_ref()),
            health: health_risk(history.health.as_ref()),
        }
    }
}

/// Academic risk from recent exam results.
///
/// Formula: `0.7 x (100 - averageScore) / 100 + 0.3 x trendRisk`, where
/// `trendRisk` compares the mean of the earliest 3 scores in the window to
/// the mean of the most recent 3, clamped at 0 so an improving average never
/// subtracts risk. Exams arrive newest first. No exams -> 0.
pub fn academic_risk(exams: &[ExamResult], today: NaiveDate, config: &EngineConfig) -> f64 {
    let cutoff = today - Duration::days(config.windows.academic_days);
    let windowed: Vec<&ExamResult> = exams.iter().filter(|e| e.date >= cutoff).collect();
    if windowed.is_empty() {
        return 0.0;
    }

    let average = windowed.iter().map(|e| e.score).sum::<f64>() / windowed.len() as f64;
    let base_risk = (100.0 - average) / 100.0;

    // Newest-first ordering: the head of the list is the recent end.
    let recent_count = windowed.len().min(3);
    let recent_avg = windowed[..recent_count].iter().map(|e| e.score).sum::<f64>()
        / recent_count as f64;
    let earliest_count = windowed.len().min(3);
    let earliest_avg = windowed[windowed.len() - earliest_count..]
        .iter()
        .map(|e| e.score)
        .sum::<f64>()
        / earliest_count as f64;

    // Falling grades raise risk; rising grades clamp to zero.
    let trend_risk = ((earliest_avg - recent_avg) / 100.0).clamp(0.0, 1.0);

    (0.7 * base_risk + 0.3 * trend_risk).clamp(0.0, 1.0)
}

/// Behavioral risk from negative incidents in the recent window.
///
/// Formula: `0.6 x min(1, count / 10) + 0.4 x averageSeverity` with severity
/// weights LOW 0.3, MEDIUM 0.6, HIGH 1.0. No negative incidents -> 0.
pub fn behavioral_risk(
    incidents: &[BehaviorIncident],
    today: NaiveDate,
    config: &EngineConfig,
) -> f64 {
    let cutoff = today - Duration::days(config.windows.behavioral_days);
    let negative: Vec<&BehaviorIncident> = incidents
        .iter()
        .filter(|i| i.kind == IncidentKind::Negative && i.date >= cutoff)
        .collect();
    if negative.is_empty() {
        return 0.0;
    }

    let count_risk = (negative.len() as f64 / 10.0).min(1.0);
    let average_severity = negative
        .iter()
        .map(|i| i.severity.risk_weight())
        .sum::<f64>()
        / negative.len() as f64;

    (0.6 * count_risk + 0.4 * average_severity).clamp(0.0, 1.0)
}

/// Attendance risk from absences and tardies in the recent window.
///
/// Formula: `0.7 x min(1, absences / 15) + 0.3 x min(1, tardies / 20)`.
pub fn attendance_risk(
    records: &[AttendanceRecord],
    today: NaiveDate,
    config: &EngineConfig,
) -> f64 {
    let cutoff = today - Duration::days(config.windows.attendance_days);
    let mut absences = 0u32;
    let mut tardies = 0u32;
    for record in records.iter().filter(|r| r.date >= cutoff) {
        match record.status {
            AttendanceStatus::Absent => absences += 1,
            AttendanceStatus::Tardy => tardies += 1,
            AttendanceStatus::Present => {}
        }
    }

    let absence_risk = (absences as f64 / 15.0).min(1.0);
    let tardy_risk = (tardies as f64 / 20.0).min(1.0);
    (0.7 * absence_risk + 0.3 * tardy_risk).clamp(0.0, 1.0)
}

/// Social-emotional risk from the current snapshot.
///
/// Formula: `0.5 x (5 - avg(empathy, regulation, conflictResolution)) / 5
/// + 0.3 x circleRisk + 0.2 x bullyingRisk`. No profile -> 0.5.
pub fn social_emotional_risk(profile: Option<&SocialEmotionalProfile>) -> f64 {
    let Some(profile) = profile else {
        return UNKNOWN_PROFILE_RISK;
    };

    let skill_avg = (profile.empathy as f64
        + profile.emotion_regulation as f64
        + profile.conflict_resolution as f64)
        / 3.0;
    let skill_risk = ((5.0 - skill_avg) / 5.0).clamp(0.0, 1.0);

    let circle_risk = match profile.friend_circle {
        FriendCircleSize::None => 1.0,
        FriendCircleSize::Few => 0.7,
        FriendCircleSize::Moderate => 0.3,
        FriendCircleSize::Large => 0.0,
    };

    let bullying_risk = match profile.bullying {
        BullyingStatus::Victim => 0.8,
        BullyingStatus::Perpetrator => 0.9,
        BullyingStatus::Both => 1.0,
        BullyingStatus::None | BullyingStatus::Observer => 0.0,
    };

    (0.5 * skill_risk + 0.3 * circle_risk + 0.2 * bullying_risk).clamp(0.0, 1.0)
}

/// Family-support risk from the current snapshot.
///
/// Formula: `0.4 x involvementRisk + 0.4 x stabilityRisk
/// + 0.2 x communicationRisk`, each from the 3-level rating mapping
/// (LOW 1.0, MEDIUM 0.5, HIGH 0.0). No profile -> 0.5.
pub fn family_support_risk(profile: Option<&FamilyContext>) -> f64 {
    let Some(profile) = profile else {
        return UNKNOWN_PROFILE_RISK;
    };

    (0.4 * profile.parental_involvement.risk_weight()
        + 0.4 * profile.family_stability.risk_weight()
        + 0.2 * profile.communication_quality.risk_weight())
    .clamp(0.0, 1.0)
}

/// Peer-relations risk from the current snapshot.
///
/// Formula: `0.4 x integrationRisk + 0.4 x friendshipQualityRisk
/// + 0.2 x (1 - peerAcceptance / 10)`. No profile -> 0.5.
pub fn peer_relations_risk(profile: Option<&PeerProfile>) -> f64 {
    let Some(profile) = profile else {
        return UNKNOWN_PROFILE_RISK;
    };

    let acceptance_risk = (1.0 - profile.peer_acceptance / 10.0).clamp(0.0, 1.0);
    (0.4 * profile.social_integration.risk_weight()
        + 0.4 * profile.friendship_quality.risk_weight()
        + 0.2 * acceptance_risk)
        .clamp(0.0, 1.0)
}

/// Motivation risk from the current snapshot.
///
/// Formula: `0.6 x (5 - intrinsicMotivation) / 5 + 0.4 x (5 - resilience) / 5`.
/// No profile -> 0.5.
pub fn motivation_risk(profile: Option<&MotivationProfile>) -> f64 {
    let Some(profile) = profile else {
        return UNKNOWN_PROFILE_RISK;
    };

    let intrinsic_risk = ((5.0 - profile.intrinsic_motivation as f64) / 5.0).clamp(0.0, 1.0);
    let resilience_risk = ((5.0 - profile.resilience as f64) / 5.0).clamp(0.0, 1.0);
    (0.6 * intrinsic_risk + 0.4 * resilience_risk).clamp(0.0, 1.0)
}

/// Health risk from the current snapshot.
///
/// 0.5 when chronic conditions are present, 0.3 when only free-text concerns
/// are present, else 0. No profile -> 0 (unlike the profile domains above,
/// absence of a health record is not treated as unknown risk).
pub fn health_risk(profile: Option<&HealthProfile>) -> f64 {
    let Some(profile) = profile else {
        return 0.0;
    };

    if !profile.chronic_conditions.is_empty() {
        CHRONIC_CONDITION_RISK
    } else if !profile.concerns.is_empty() {
        HEALTH_CONCERN_RISK
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{IncidentSeverity, SupportLevel};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
    }

    fn days_ago(days: i64) -> NaiveDate {
        today() - Duration::days(days)
    }

    fn exam(days: i64, subject: &str, score: f64) -> ExamResult {
        ExamResult {
            date: days_ago(days),
            subject: subject.to_string(),
            score,
        }
    }

    fn incident(days: i64, category: &str, severity: IncidentSeverity) -> BehaviorIncident {
        BehaviorIncident {
            date: days_ago(days),
            kind: IncidentKind::Negative,
            category: category.to_string(),
            severity,
        }
    }

    #[test]
    fn academic_no_exams_is_zero() {
        let config = EngineConfig::default();
        assert_eq!(academic_risk(&[], today(), &config), 0.0);
    }

    #[test]
    fn academic_improving_trend_clamps_to_base_risk() {
        let config = EngineConfig::default();
        // Newest first: 90, 88, 85 recently vs 60, 55, 50 earlier.
        let exams = vec![
            exam(5, "math", 90.0),
            exam(20, "math", 88.0),
            exam(40, "math", 85.0),
            exam(70, "math", 60.0),
            exam(100, "math", 55.0),
            exam(130, "math", 50.0),
        ];
        let risk = academic_risk(&exams, today(), &config);
        let average = (90.0 + 88.0 + 85.0 + 60.0 + 55.0 + 50.0) / 6.0;
        let expected = 0.7 * (100.0 - average) / 100.0;
        assert!((risk - expected).abs() < 1e-9);
    }

    #[test]
    fn academic_declining_trend_adds_risk() {
        let config = EngineConfig::default();
        let exams = vec![
            exam(5, "math", 50.0),
            exam(20, "math", 55.0),
            exam(40, "math", 60.0),
            exam(70, "math", 85.0),
            exam(100, "math", 88.0),
            exam(130, "math", 90.0),
        ];
        let risk = academic_risk(&exams, today(), &config);
        let average = (50.0 + 55.0 + 60.0 + 85.0 + 88.0 + 90.0) / 6.0;
        let recent = (50.0 + 55.0 + 60.0) / 3.0;
        let earliest = (85.0 + 88.0 + 90.0) / 3.0;
        let expected = 0.7 * (100.0 - average) / 100.0 + 0.3 * (earliest - recent) / 100.0;
        assert!((risk - expected).abs() < 1e-9);
    }

    #[test]
    fn academic_ignores_exams_outside_window() {
        let config = EngineConfig::default();
        let exams = vec![exam(400, "math", 0.0)];
        assert_eq!(academic_risk(&exams, today(), &config), 0.0);
    }

    #[test]
    fn behavioral_formula_matches_documented_weights() {
        let config = EngineConfig::default();
        let incidents = vec![
            incident(3, "disruption", IncidentSeverity::Medium),
            incident(10, "disruption", IncidentSeverity::High),
        ];
        let risk = behavioral_risk(&incidents, today(), &config);
        let expected = 0.6 * (2.0 / 10.0) + 0.4 * ((0.6 + 1.0) / 2.0);
        assert!((risk - expected).abs() < 1e-9);
    }

    #[test]
    fn behavioral_ignores_positive_and_stale_incidents() {
        let config = EngineConfig::default();
        let incidents = vec![
            BehaviorIncident {
                date: days_ago(5),
                kind: IncidentKind::Positive,
                category: "helping".to_string(),
                severity: IncidentSeverity::Low,
            },
            incident(120, "disruption", IncidentSeverity::High),
        ];
        assert_eq!(behavioral_risk(&incidents, today(), &config), 0.0);
    }

    #[test]
    fn behavioral_count_saturates_at_ten() {
        let config = EngineConfig::default();
        let incidents: Vec<BehaviorIncident> = (0..15)
            .map(|i| incident(i, "aggression", IncidentSeverity::High))
            .collect();
        let risk = behavioral_risk(&incidents, today(), &config);
        assert!((risk - 1.0).abs() < 1e-9);
    }

    #[test]
    fn attendance_formula_matches_documented_weights() {
        let config = EngineConfig::default();
        let mut records = Vec::new();
        for i in 0..6 {
            records.push(AttendanceRecord {
                date: days_ago(i * 2),
                status: AttendanceStatus::Absent,
            });
        }
        for i in 0..4 {
            records.push(AttendanceRecord {
                date: days_ago(i * 3 + 1),
                status: AttendanceStatus::Tardy,
            });
        }
        let risk = attendance_risk(&records, today(), &config);
        let expected = 0.7 * (6.0 / 15.0) + 0.3 * (4.0 / 20.0);
        assert!((risk - expected).abs() < 1e-9);
    }

    #[test]
    fn attendance_perfect_record_is_zero() {
        let config = EngineConfig::default();
        let records = vec![AttendanceRecord {
            date: days_ago(1),
            status: AttendanceStatus::Present,
        }];
        assert_eq!(attendance_risk(&records, today(), &config), 0.0);
    }

    #[test]
    fn missing_profiles_use_neutral_defaults() {
        assert_eq!(social_emotional_risk(None), 0.5);
        assert_eq!(family_support_risk(None), 0.5);
        assert_eq!(peer_relations_risk(None), 0.5);
        assert_eq!(motivation_risk(None), 0.5);
        assert_eq!(health_risk(None), 0.0);
    }

    #[test]
    fn social_emotional_blends_skills_circle_and_bullying() {
        let profile = SocialEmotionalProfile {
            empathy: 2,
            emotion_regulation: 2,
            conflict_resolution: 2,
            leadership: 1,
            friend_circle: FriendCircleSize::Few,
            bullying: BullyingStatus::Victim,
        };
        let risk = social_emotional_risk(Some(&profile));
        let expected = 0.5 * (5.0 - 2.0) / 5.0 + 0.3 * 0.7 + 0.2 * 0.8;
        assert!((risk - expected).abs() < 1e-9);
    }

    #[test]
    fn family_support_high_everything_is_zero_risk() {
        let profile = FamilyContext {
            parental_involvement: SupportLevel::High,
            family_stability: SupportLevel::High,
            communication_quality: SupportLevel::High,
        };
        assert_eq!(family_support_risk(Some(&profile)), 0.0);
    }

    #[test]
    fn peer_relations_blends_acceptance() {
        let profile = PeerProfile {
            social_integration: SupportLevel::Medium,
            friendship_quality: SupportLevel::Low,
            peer_acceptance: 4.0,
        };
        let risk = peer_relations_risk(Some(&profile));
        let expected = 0.4 * 0.5 + 0.4 * 1.0 + 0.2 * 0.6;
        assert!((risk - expected).abs() < 1e-9);
    }

    #[test]
    fn motivation_low_everything_is_high_risk() {
        let profile = MotivationProfile {
            intrinsic_motivation: 1,
            resilience: 1,
        };
        let risk = motivation_risk(Some(&profile));
        let expected = 0.6 * 0.8 + 0.4 * 0.8;
        assert!((risk - expected).abs() < 1e-9);
    }

    #[test]
    fn health_risk_tiers() {
        let chronic = HealthProfile {
            chronic_conditions: vec!["asthma".to_string()],
            concerns: Vec::new(),
        };
        let concerns_only = HealthProfile {
            chronic_conditions: Vec::new(),
            concerns: vec!["frequent headaches".to_string()],
        };
        let clear = HealthProfile {
            chronic_conditions: Vec::new(),
            concerns: Vec::new(),
        };
        assert_eq!(health_risk(Some(&chronic)), 0.5);
        assert_eq!(health_risk(Some(&concerns_only)), 0.3);
        assert_eq!(health_risk(Some(&clear)), 0.0);
    }

    #[test]
    fn all_factor_scores_stay_in_unit_range() {
        let config = EngineConfig::default();
        let history = StudentHistory {
            exams: vec![exam(1, "math", 0.0), exam(2, "math", 0.0)],
            incidents: (0..20)
                .map(|i| incident(i, "aggression", IncidentSeverity::High))
                .collect(),
            attendance: (0..40)
                .map(|i| AttendanceRecord {
                    date: days_ago(i),
                    status: AttendanceStatus::Absent,
                })
                .collect(),
            social_emotional: Some(SocialEmotionalProfile {
                empathy: 1,
                emotion_regulation: 1,
                conflict_resolution: 1,
                leadership: 1,
                friend_circle: FriendCircleSize::None,
                bullying: BullyingStatus::Both,
            }),
            family: Some(FamilyContext {
                parental_involvement: SupportLevel::Low,
                family_stability: SupportLevel::Low,
                communication_quality: SupportLevel::Low,
            }),
            peer: Some(PeerProfile {
                social_integration: SupportLevel::Low,
                friendship_quality: SupportLevel::Low,
                peer_acceptance: 0.0,
            }),
            motivation: Some(MotivationProfile {
                intrinsic_motivation: 1,
                resilience: 1,
            }),
            health: Some(HealthProfile {
                chronic_conditions: vec!["epilepsy".to_string()],
                concerns: Vec::new(),
            }),
            talents: None,
        };

        let scores = FactorCalculator::compute(&history, today(), &config);
        for (_, value) in scores.named() {
            assert!((0.0..=1.0).contains(&value), "factor out of range: {value}");
        }
    }

    #[test]
    fn domain_coverage_counts_populated_tables() {
        let empty = StudentHistory::default();
        assert_eq!(DomainCoverage::of(&empty).count(), 0);

        let partial = StudentHistory {
            exams: vec![exam(1, "math", 80.0)],
            motivation: Some(MotivationProfile {
                intrinsic_motivation: 3,
                resilience: 3,
            }),
            ..Default::default()
        };
        assert_eq!(DomainCoverage::of(&partial).count(), 2);
    }
}
