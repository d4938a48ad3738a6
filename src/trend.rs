//! Trend and predictive indicators
//!
//! Classifies the direction and volatility of a student's risk-score history
//! and projects the score forward. Note the sign convention: history scores
//! are risk values, so a rising recent average means the student is getting
//! worse and the trend is DECLINING.

use crate::config::EngineConfig;
use crate::types::{
    ForecastHorizon, RiskAssessment, RiskForecast, RiskHistoryEntry, StudentId, Trend,
    TrendAnalysis, TrendPredictions,
};

/// Generator for trend analyses and horizon forecasts
pub struct TrendGenerator;

impl TrendGenerator {
    /// Analyze a risk-score history, newest entry first.
    ///
    /// Fewer than 2 entries defaults to STABLE with zero volatility and flat
    /// predictions. Otherwise the newest half (rounded up) is compared
    /// against the remainder, and the population variance of all scores
    /// drives the volatility index and the VOLATILE override.
    pub fn analyze(
        student_id: StudentId,
        history: &[RiskHistoryEntry],
        config: &EngineConfig,
    ) -> TrendAnalysis {
        let trend_cfg = &config.trend;
        let scores: Vec<f64> = history
            .iter()
            .take(trend_cfg.max_history)
            .map(|entry| entry.overall_score)
            .collect();

        if scores.len() < 2 {
            let current = scores.first().copied().unwrap_or(0.0);
            return TrendAnalysis {
                student_id,
                scores,
                trend: Trend::Stable,
                trend_percentage: 0.0,
                volatility_index: 0.0,
                predictions: TrendPredictions {
                    next_7_days: current,
                    next_30_days: current,
                    next_90_days: current,
                },
            };
        }

        let split = scores.len().div_ceil(2);
        let recent_avg = mean(&scores[..split]);
        let earlier_avg = mean(&scores[split..]);

        let trend_percentage = if earlier_avg.abs() < f64::EPSILON {
            0.0
        } else {
            (recent_avg - earlier_avg) / earlier_avg * 100.0
        };

        let variance = population_variance(&scores);
        let volatility_index = if variance > trend_cfg.volatility_floor {
            variance
        } else {
            0.0
        };

        let mut trend = if trend_percentage > trend_cfg.declining_pct {
            Trend::Declining
        } else if trend_percentage < trend_cfg.improving_pct {
            Trend::Improving
        } else {
            Trend::Stable
        };
        if variance > trend_cfg.volatile_override {
            trend = Trend::Volatile;
        }

        let [d7, d30, d90] = trend_cfg.horizon_damping;
        let predictions = TrendPredictions {
            next_7_days: project(recent_avg, trend_percentage, d7),
            next_30_days: project(recent_avg, trend_percentage, d30),
            next_90_days: project(recent_avg, trend_percentage, d90),
        };

        TrendAnalysis {
            student_id,
            scores,
            trend,
            trend_percentage,
            volatility_index,
            predictions,
        }
    }

    /// Produce short/medium/long-horizon forecasts from a fresh assessment
    /// and its trend analysis, each with threshold-gated suggested actions.
    pub fn forecast(
        assessment: &RiskAssessment,
        trend: &TrendAnalysis,
        config: &EngineConfig,
    ) -> Vec<RiskForecast> {
        vec![
            short_term(assessment, trend, config),
            medium_term(assessment, config),
            long_term(assessment, trend, config),
        ]
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// `min(1, recentAvg x (1 + trendPct/100 x damping))`
fn project(recent_avg: f64, trend_pct: f64, damping: f64) -> f64 {
    (recent_avg * (1.0 + trend_pct / 100.0 * damping)).clamp(0.0, 1.0)
}

/// Short-term: current score scaled by the trend multiplier
fn short_term(
    assessment: &RiskAssessment,
    trend: &TrendAnalysis,
    config: &EngineConfig,
) -> RiskForecast {
    let fc = &config.forecast;
    let multiplier = match trend.trend {
        Trend::Declining => fc.declining_multiplier,
        Trend::Improving => fc.improving_multiplier,
        Trend::Stable | Trend::Volatile => 1.0,
    };
    let projected = (assessment.overall_score * multiplier).clamp(0.0, 1.0);

    let mut actions = Vec::new();
    if trend.trend == Trend::Declining {
        actions.push("Schedule a counselor check-in this week".to_string());
    }
    if trend.volatility_index > config.trend.volatility_floor {
        actions.push("Review recent events for acute stressors".to_string());
    }
    if projected > config.levels.critical {
        actions.push("Notify the student support team".to_string());
    }

    RiskForecast {
        horizon: ForecastHorizon::ShortTerm,
        projected_score: projected,
        suggested_actions: actions,
    }
}

/// Medium-term: current score plus factor-threshold-gated penalties
fn medium_term(assessment: &RiskAssessment, config: &EngineConfig) -> RiskForecast {
    let fc = &config.forecast;
    let factors = &assessment.factors;
    let mut projected = assessment.overall_score;
    let mut actions = Vec::new();

    if factors.behavioral > fc.behavioral_gate {
        projected += fc.behavioral_penalty;
        actions.push("Start a behavior support plan".to_string());
    }
    if factors.attendance > fc.attendance_gate {
        projected += fc.attendance_penalty;
        actions.push("Set up attendance monitoring with weekly review".to_string());
    }
    if factors.academic > fc.academic_gate {
        projected += fc.academic_penalty;
        actions.push("Arrange sustained tutoring for core subjects".to_string());
    }

    RiskForecast {
        horizon: ForecastHorizon::MediumTerm,
        projected_score: projected.clamp(0.0, 1.0),
        suggested_actions: actions,
    }
}

/// Long-term: current score plus family/social penalties and a volatility
/// penalty when the history is erratic
fn long_term(
    assessment: &RiskAssessment,
    trend: &TrendAnalysis,
    config: &EngineConfig,
) -> RiskForecast {
    let fc = &config.forecast;
    let factors = &assessment.factors;
    let mut projected = assessment.overall_score;
    let mut actions = Vec::new();

    if factors.family_support > fc.family_gate {
        projected += fc.family_penalty;
        actions.push("Engage family support services".to_string());
    }
    if factors.social_emotional > fc.social_gate {
        projected += fc.social_penalty;
        actions.push("Plan ongoing counseling sessions".to_string());
    }
    if trend.volatility_index > config.trend.volatility_floor {
        projected += fc.volatility_penalty;
        actions.push("Maintain monthly progress reviews".to_string());
    }

    RiskForecast {
        horizon: ForecastHorizon::LongTerm,
        projected_score: projected.clamp(0.0, 1.0),
        suggested_actions: actions,
    }
}
