//! Cross-factor correlation analyzer
//!
//! Flags co-occurring signals across data domains: absences alongside poor
//! grades, and behavior incidents alongside weak emotion regulation.

use crate::config::EngineConfig;
use crate::records::{AttendanceStatus, IncidentKind, StudentHistory};
use crate::types::{InsightCategory, InsightSeverity, PatternInsight};
use chrono::{Duration, NaiveDate};

pub fn analyze(
    history: &StudentHistory,
    today: NaiveDate,
    config: &EngineConfig,
) -> Vec<PatternInsight> {
    let cutoff = today - Duration::days(config.windows.correlation_days);
    let mut insights = Vec::new();

    if let Some(insight) = attendance_grades(history, cutoff, config) {
        insights.push(insight);
    }
    if let Some(insight) = behavior_regulation(history, cutoff, config) {
        insights.push(insight);
    }

    insights
}

/// CRITICAL when heavy absence co-occurs with a failing grade average
fn attendance_grades(
    history: &StudentHistory,
    cutoff: NaiveDate,
    config: &EngineConfig,
) -> Option<PatternInsight> {
    let absences = history
        .attendance
        .iter()
        .filter(|r| r.date >= cutoff && r.status == AttendanceStatus::Absent)
        .count();
    if absences < config.patterns.correlation_absences {
        return None;
    }

    let grades: Vec<f64> = history
        .exams
        .iter()
        .filter(|e| e.date >= cutoff)
        .map(|e| e.score)
        .collect();
    if grades.is_empty() {
        return None;
    }
    let average = grades.iter().sum::<f64>() / grades.len() as f64;
    if average >= config.patterns.correlation_grade_floor {
        return None;
    }

    Some(PatternInsight {
        category: InsightCategory::Correlation,
        severity: InsightSeverity::Critical,
        title: "Absences tracking with failing grades".to_string(),
        description: format!(
            "{absences} absences in 2 months alongside a {average:.1} grade average"
        ),
        evidence: vec![
            format!("absences in 60 days: {absences}"),
            format!("grade average in 60 days: {average:.1}"),
        ],
        recommendation: Some(
            "Treat attendance and academics as one intervention, not two".to_string(),
        ),
    })
}

/// WARNING when repeated incidents co-occur with weak emotion regulation
fn behavior_regulation(
    history: &StudentHistory,
    cutoff: NaiveDate,
    config: &EngineConfig,
) -> Option<PatternInsight> {
    let incidents = history
        .incidents
        .iter()
        .filter(|i| i.kind == IncidentKind::Negative && i.date >= cutoff)
        .count();
    if incidents < config.patterns.correlation_incidents {
        return None;
    }

    let regulation = history.social_emotional.as_ref()?.emotion_regulation;
    if regulation >= config.patterns.correlation_regulation_floor {
        return None;
    }

    Some(PatternInsight {
        category: InsightCategory::Correlation,
        severity: InsightSeverity::Warning,
        title: "Incidents tracking with low emotion regulation".to_string(),
        description: format!(
            "{incidents} negative incidents in 2 months with emotion regulation at level {regulation}"
        ),
        evidence: vec![
            format!("negative incidents in 60 days: {incidents}"),
            format!("emotion regulation level: {regulation}"),
        ],
        recommendation: Some(
            "Pair behavior consequences with emotion-regulation coaching".to_string(),
        ),
    })
}
