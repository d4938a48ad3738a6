//! Core output types for the Atlas Insight engine
//!
//! This module defines the data structures handed to dashboard, report, and
//! UI consumers: risk assessments, trend analyses, mined insights, and peer
//! network metrics. Everything here is plain serializable data with no
//! behavior beyond small classification helpers.

use crate::config::LevelThresholds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Student identifier used throughout the engine
pub type StudentId = Uuid;

/// One of the eight independent risk dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Academic,
    Behavioral,
    Attendance,
    SocialEmotional,
    FamilySupport,
    PeerRelations,
    Motivation,
    Health,
}

impl FactorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactorKind::Academic => "academic",
            FactorKind::Behavioral => "behavioral",
            FactorKind::Attendance => "attendance",
            FactorKind::SocialEmotional => "social_emotional",
            FactorKind::FamilySupport => "family_support",
            FactorKind::PeerRelations => "peer_relations",
            FactorKind::Motivation => "motivation",
            FactorKind::Health => "health",
        }
    }

    /// Human-readable name used in finding descriptions
    pub fn display_name(&self) -> &'static str {
        match self {
            FactorKind::Academic => "Academic performance",
            FactorKind::Behavioral => "Behavioral incidents",
            FactorKind::Attendance => "Attendance",
            FactorKind::SocialEmotional => "Social-emotional wellbeing",
            FactorKind::FamilySupport => "Family support",
            FactorKind::PeerRelations => "Peer relations",
            FactorKind::Motivation => "Motivation",
            FactorKind::Health => "Health",
        }
    }
}

/// Eight normalized risk contributions, each in [0, 1]. Higher = more risk.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FactorScores {
    pub academic: f64,
    pub behavioral: f64,
    pub attendance: f64,
    pub social_emotional: f64,
    pub family_support: f64,
    pub peer_relations: f64,
    pub motivation: f64,
    pub health: f64,
}

impl FactorScores {
    /// All eight scores paired with their factor kind, in weight order
    pub fn named(&self) -> [(FactorKind, f64); 8] {
        [
            (FactorKind::Academic, self.academic),
            (FactorKind::Behavioral, self.behavioral),
            (FactorKind::Attendance, self.attendance),
            (FactorKind::SocialEmotional, self.social_emotional),
            (FactorKind::FamilySupport, self.family_support),
            (FactorKind::PeerRelations, self.peer_relations),
            (FactorKind::Motivation, self.motivation),
            (FactorKind::Health, self.health),
        ]
    }
}

/// Categorical overall risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Classify an overall score. Pure function of the score and thresholds.
    pub fn from_score(score: f64, levels: &LevelThresholds) -> Self {
        if score < levels.medium {
            RiskLevel::Low
        } else if score < levels.high {
            RiskLevel::Medium
        } else if score < levels.critical {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

/// Severity of an explained risk-factor finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingSeverity {
    Medium,
    High,
    Critical,
}

/// A factor flagged as a key risk contributor, with a templated explanation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactorFinding {
    pub factor: FactorKind,
    /// The factor score that triggered the finding (0-1)
    pub score: f64,
    pub severity: FindingSeverity,
    pub description: String,
    pub recommendation: String,
}

/// A positive trait or circumstance that offsets risk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectiveFactor {
    pub label: String,
    /// Simple strength score (trait level x 2)
    pub strength: f64,
}

/// Complete risk picture for one student, computed fresh on every request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub student_id: StudentId,
    pub generated_at: DateTime<Utc>,
    pub factors: FactorScores,
    /// Weighted aggregate in [0, 1]
    pub overall_score: f64,
    pub risk_level: RiskLevel,
    /// Share of the eight source domains that had data, as a 0-100 percentage
    pub confidence: f64,
    /// Findings sorted by severity, most severe first
    pub key_risk_factors: Vec<RiskFactorFinding>,
    pub protective_factors: Vec<ProtectiveFactor>,
    pub engine_version: String,
}

/// Immutable snapshot of a past assessment, written only via an explicit
/// commit-to-history call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskHistoryEntry {
    pub student_id: StudentId,
    pub recorded_at: DateTime<Utc>,
    pub overall_score: f64,
    pub risk_level: RiskLevel,
    pub factors: FactorScores,
}

impl RiskHistoryEntry {
    pub fn from_assessment(assessment: &RiskAssessment) -> Self {
        Self {
            student_id: assessment.student_id,
            recorded_at: assessment.generated_at,
            overall_score: assessment.overall_score,
            risk_level: assessment.risk_level,
            factors: assessment.factors,
        }
    }
}

/// Direction of a student's risk history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
    Volatile,
}

/// Projected risk scores at fixed horizons
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrendPredictions {
    pub next_7_days: f64,
    pub next_30_days: f64,
    pub next_90_days: f64,
}

/// Trend classification over a student's recent score history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub student_id: StudentId,
    /// Historical overall scores, newest first, at most 20
    pub scores: Vec<f64>,
    pub trend: Trend,
    /// Percentage change of the recent-half average vs the earlier-half
    /// average. Positive = risk rising (worsening).
    pub trend_percentage: f64,
    /// Population variance of the score history; 0 when below the noise floor
    pub volatility_index: f64,
    pub predictions: TrendPredictions,
}

/// Forecast horizon buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastHorizon {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

/// A horizon forecast with its threshold-gated suggested actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskForecast {
    pub horizon: ForecastHorizon,
    /// Projected overall score, clamped to [0, 1]
    pub projected_score: f64,
    pub suggested_actions: Vec<String>,
}

/// Category of a mined insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsightCategory {
    Trend,
    Pattern,
    Correlation,
    Anomaly,
    Prediction,
}

/// Severity of a mined insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsightSeverity {
    Info,
    Warning,
    Critical,
}

/// A single mined observation with the concrete numbers behind it.
/// Generated on demand, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternInsight {
    pub category: InsightCategory,
    pub severity: InsightSeverity,
    pub title: String,
    pub description: String,
    /// The concrete numbers the rule fired on, in display order
    pub evidence: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// Type of a peer relationship edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    Friend,
    CloseFriend,
    Acquaintance,
    StudyPartner,
    Conflict,
}

/// One edge of the peer graph. Read-only input to the analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerRelationship {
    pub student_id: StudentId,
    pub peer_id: StudentId,
    pub relationship: RelationshipType,
    /// Tie strength on a 1-10 scale
    pub strength: f64,
}

/// Social disconnection severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IsolationRisk {
    Low,
    Medium,
    High,
    Critical,
}

/// Role a student plays in the class network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SocialRole {
    Leader,
    Bridge,
    Follower,
    Isolate,
    Peripheral,
}

/// Per-student network position. One authoritative row per (student, class);
/// recomputation upserts in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkMetrics {
    pub student_id: StudentId,
    pub class_name: String,
    /// Non-conflict connections relative to class size (0-1)
    pub centrality: f64,
    /// Two-hop path share heuristic, not true betweenness centrality
    pub betweenness: f64,
    /// Count of distinct non-conflict peers
    pub degree: usize,
    pub isolation_risk: IsolationRisk,
    pub social_role: SocialRole,
    pub influence_score: f64,
}

/// A detected friend cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendCluster {
    pub members: Vec<StudentId>,
    /// Actual internal edges over size x (size - 1); 0 for singleton clusters
    pub cohesion: f64,
}

/// A CONFLICT-typed edge surfaced at class level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictPair {
    pub student_a: StudentId,
    pub student_b: StudentId,
    pub strength: f64,
}

/// Class-level network summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassNetwork {
    pub class_name: String,
    /// Non-conflict edge count over possible undirected pairs (0-1)
    pub density: f64,
    pub clusters: Vec<FriendCluster>,
    pub isolated_students: Vec<StudentId>,
    /// Top students by influence among LEADER/BRIDGE roles
    pub central_figures: Vec<StudentId>,
    /// CONFLICT edges sorted by strength descending
    pub conflicts: Vec<ConflictPair>,
}
