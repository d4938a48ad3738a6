//! Engine configuration
//!
//! Every weight, threshold, and window length used by the analytics engine
//! lives here so the calibrated values can be inspected and unit-tested in
//! one place instead of being scattered through algorithm code.

use serde::{Deserialize, Serialize};

/// Fixed per-factor weights used by the risk aggregator.
///
/// Weights must sum to 1.0; `sum()` is checked in tests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FactorWeights {
    pub academic: f64,
    pub behavioral: f64,
    pub attendance: f64,
    pub social_emotional: f64,
    pub family_support: f64,
    pub peer_relations: f64,
    pub motivation: f64,
    pub health: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            academic: 0.25,
            behavioral: 0.20,
            attendance: 0.20,
            social_emotional: 0.15,
            family_support: 0.08,
            peer_relations: 0.07,
            motivation: 0.03,
            health: 0.02,
        }
    }
}

impl FactorWeights {
    /// Sum of all eight weights
    pub fn sum(&self) -> f64 {
        self.academic
            + self.behavioral
            + self.attendance
            + self.social_emotional
            + self.family_support
            + self.peer_relations
            + self.motivation
            + self.health
    }
}

/// Overall-score cutoffs for the four risk levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LevelThresholds {
    /// Scores below this are LOW
    pub medium: f64,
    /// Scores below this (and at/above `medium`) are MEDIUM
    pub high: f64,
    /// Scores below this (and at/above `high`) are HIGH; at/above are CRITICAL
    pub critical: f64,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            medium: 0.25,
            high: 0.50,
            critical: 0.75,
        }
    }
}

/// Thresholds for turning factor scores into explained findings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FindingThresholds {
    /// Minimum factor score for inclusion as a key risk factor
    pub key_factor_floor: f64,
    /// Factor score above which a finding is HIGH
    pub high: f64,
    /// Factor score above which a finding is CRITICAL
    pub critical: f64,
    /// Minimum 1-5 level for a trait to count as protective
    pub protective_level: u8,
}

impl Default for FindingThresholds {
    fn default() -> Self {
        Self {
            key_factor_floor: 0.5,
            high: 0.65,
            critical: 0.8,
            protective_level: 4,
        }
    }
}

/// Trend classification and prediction parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Maximum history entries considered (newest first)
    pub max_history: usize,
    /// Trend percentage above which the trend is DECLINING (risk rising)
    pub declining_pct: f64,
    /// Trend percentage below which the trend is IMPROVING (risk falling)
    pub improving_pct: f64,
    /// Population variance below which volatility is reported as zero
    pub volatility_floor: f64,
    /// Population variance above which the trend is overridden to VOLATILE
    pub volatile_override: f64,
    /// Damping applied to the trend percentage for the 7/30/90-day predictions
    pub horizon_damping: [f64; 3],
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            max_history: 20,
            declining_pct: 10.0,
            improving_pct: -10.0,
            volatility_floor: 0.15,
            volatile_override: 0.2,
            horizon_damping: [0.1, 0.3, 0.5],
        }
    }
}

/// Horizon forecast multipliers and factor-gated penalties
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Short-term multiplier when the trend is DECLINING
    pub declining_multiplier: f64,
    /// Short-term multiplier when the trend is IMPROVING
    pub improving_multiplier: f64,
    /// Medium-term penalty when the behavioral factor exceeds 0.7
    pub behavioral_penalty: f64,
    /// Medium-term penalty when the attendance factor exceeds 0.6
    pub attendance_penalty: f64,
    /// Medium-term penalty when the academic factor exceeds 0.7
    pub academic_penalty: f64,
    /// Long-term penalty when the family-support factor exceeds 0.7
    pub family_penalty: f64,
    /// Long-term penalty when the social-emotional factor exceeds 0.6
    pub social_penalty: f64,
    /// Long-term penalty when the volatility index exceeds the floor
    pub volatility_penalty: f64,
    pub behavioral_gate: f64,
    pub attendance_gate: f64,
    pub academic_gate: f64,
    pub family_gate: f64,
    pub social_gate: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            declining_multiplier: 1.1,
            improving_multiplier: 0.9,
            behavioral_penalty: 0.1,
            attendance_penalty: 0.08,
            academic_penalty: 0.12,
            family_penalty: 0.15,
            social_penalty: 0.1,
            volatility_penalty: 0.1,
            behavioral_gate: 0.7,
            attendance_gate: 0.6,
            academic_gate: 0.7,
            family_gate: 0.7,
            social_gate: 0.6,
        }
    }
}

/// Look-back window lengths in days
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Exam history window for the academic factor
    pub academic_days: i64,
    /// Incident window for the behavioral factor
    pub behavioral_days: i64,
    /// Attendance window for the attendance factor
    pub attendance_days: i64,
    /// Co-occurrence window for cross-factor correlation
    pub correlation_days: i64,
    /// One calendar month, as used by the month-over-month comparisons
    pub month_days: i64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            academic_days: 180,
            behavioral_days: 90,
            attendance_days: 90,
            correlation_days: 60,
            month_days: 30,
        }
    }
}

/// Pattern mining thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Overall exam delta (points) that counts as a trend
    pub exam_delta: f64,
    /// Per-subject exam delta (points) that counts as a trend
    pub subject_delta: f64,
    /// Minimum recent-month incident count for a month-over-month flag
    pub incident_increase_min: usize,
    /// Repeated-category count that yields a WARNING pattern
    pub repeat_warning: usize,
    /// Repeated-category count that escalates the pattern to CRITICAL
    pub repeat_critical: usize,
    /// Same-weekday absence/tardy count that counts as a day-of-week pattern
    pub weekday_min: usize,
    /// 30-day absence count that yields a WARNING
    pub absence_warning: usize,
    /// 30-day absence count that escalates to CRITICAL
    pub absence_critical: usize,
    /// Absence count for the attendance/grades correlation
    pub correlation_absences: usize,
    /// Grade average below which the attendance correlation fires
    pub correlation_grade_floor: f64,
    /// Incident count for the behavior/emotion-regulation correlation
    pub correlation_incidents: usize,
    /// Emotion-regulation level below which the behavior correlation fires
    pub correlation_regulation_floor: u8,
    /// Monthly-average drop (points) that counts as a seasonal decline
    pub seasonal_drop: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            exam_delta: 10.0,
            subject_delta: 15.0,
            incident_increase_min: 3,
            repeat_warning: 3,
            repeat_critical: 5,
            weekday_min: 3,
            absence_warning: 5,
            absence_critical: 10,
            correlation_absences: 5,
            correlation_grade_floor: 60.0,
            correlation_incidents: 3,
            correlation_regulation_floor: 3,
            seasonal_drop: 10.0,
        }
    }
}

/// Social graph thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Centrality above which a student is a LEADER
    pub leader_centrality: f64,
    /// Centrality above which a student is a BRIDGE
    pub bridge_centrality: f64,
    /// Centrality above which a student is a FOLLOWER
    pub follower_centrality: f64,
    /// Connection ratio below which isolation risk is HIGH
    pub isolation_high: f64,
    /// Connection ratio below which isolation risk is MEDIUM
    pub isolation_medium: f64,
    /// Minimum edge strength for cluster membership
    pub cluster_min_strength: f64,
    /// Number of central figures reported per class
    pub central_figures: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            leader_centrality: 0.5,
            bridge_centrality: 0.3,
            follower_centrality: 0.15,
            isolation_high: 0.1,
            isolation_medium: 0.25,
            cluster_min_strength: 5.0,
            central_figures: 5,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub weights: FactorWeights,
    pub levels: LevelThresholds,
    pub findings: FindingThresholds,
    pub trend: TrendConfig,
    pub forecast: ForecastConfig,
    pub windows: WindowConfig,
    pub patterns: PatternConfig,
    pub network: NetworkConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_weights_sum_to_one() {
        let weights = FactorWeights::default();
        assert!((weights.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn level_thresholds_are_ordered() {
        let levels = LevelThresholds::default();
        assert!(levels.medium < levels.high);
        assert!(levels.high < levels.critical);
    }

    #[test]
    fn volatile_override_sits_above_floor() {
        let trend = TrendConfig::default();
        assert!(trend.volatile_override > trend.volatility_floor);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: EngineConfig = serde_json::from_str(&json).unwrap();
        assert!((restored.weights.sum() - 1.0).abs() < 1e-6);
        assert_eq!(restored.trend.max_history, 20);
    }
}
