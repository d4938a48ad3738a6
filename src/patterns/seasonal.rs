//! Temporal/seasonal analyzer
//!
//! Compares monthly grade averages between the first and second half of the
//! observed period to catch slow slides that per-exam deltas miss.

use crate::config::EngineConfig;
use crate::records::ExamResult;
use crate::types::{InsightCategory, InsightSeverity, PatternInsight};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Minimum distinct months required for a half-over-half comparison
const MIN_MONTHS: usize = 3;

pub fn analyze(exams: &[ExamResult], _today: NaiveDate, config: &EngineConfig) -> Vec<PatternInsight> {
    // Keyed by (year, month) so the BTreeMap iterates chronologically.
    let mut monthly: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();
    for exam in exams {
        monthly
            .entry((exam.date.year(), exam.date.month()))
            .or_default()
            .push(exam.score);
    }

    if monthly.len() < MIN_MONTHS {
        return Vec::new();
    }

    let averages: Vec<f64> = monthly
        .values()
        .map(|scores| scores.iter().sum::<f64>() / scores.len() as f64)
        .collect();

    let split = averages.len() / 2;
    let first_half = &averages[..split];
    let second_half = &averages[split..];
    let first_avg = first_half.iter().sum::<f64>() / first_half.len() as f64;
    let second_avg = second_half.iter().sum::<f64>() / second_half.len() as f64;
    let drop = first_avg - second_avg;

    if drop <= config.patterns.seasonal_drop {
        return Vec::new();
    }

    vec![PatternInsight {
        category: InsightCategory::Trend,
        severity: InsightSeverity::Warning,
        title: "Grades slipping over the term".to_string(),
        description: format!(
            "Monthly grade average fell from {first_avg:.1} to {second_avg:.1} over {} months",
            averages.len()
        ),
        evidence: vec![
            format!("first-half monthly average: {first_avg:.1}"),
            format!("second-half monthly average: {second_avg:.1}"),
            format!("drop: {drop:.1} points"),
        ],
        recommendation: Some(
            "Look for term-long causes such as workload, schedule, or home changes".to_string(),
        ),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exam(year: i32, month: u32, day: u32, score: f64) -> ExamResult {
        ExamResult {
            date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            subject: "math".to_string(),
            score,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
    }

    #[test]
    fn term_long_slide_is_flagged() {
        let config = EngineConfig::default();
        let exams = vec![
            exam(2025, 11, 10, 85.0),
            exam(2025, 11, 24, 83.0),
            exam(2025, 12, 8, 80.0),
            exam(2026, 1, 12, 70.0),
            exam(2026, 2, 9, 66.0),
            exam(2026, 3, 2, 62.0),
        ];
        let insights = analyze(&exams, today(), &config);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].severity, InsightSeverity::Warning);
        // First half: Nov 84.0, Dec 80.0 -> 82.0. Second: Jan/Feb/Mar -> 66.0.
        assert!(insights[0].evidence.iter().any(|e| e.contains("82.0")));
        assert!(insights[0].evidence.iter().any(|e| e.contains("66.0")));
    }

    #[test]
    fn flat_months_stay_quiet() {
        let config = EngineConfig::default();
        let exams = vec![
            exam(2026, 1, 10, 75.0),
            exam(2026, 2, 10, 73.0),
            exam(2026, 3, 10, 72.0),
        ];
        assert!(analyze(&exams, today(), &config).is_empty());
    }

    #[test]
    fn fewer_than_three_months_are_skipped() {
        let config = EngineConfig::default();
        let exams = vec![exam(2026, 2, 10, 90.0), exam(2026, 3, 10, 40.0)];
        assert!(analyze(&exams, today(), &config).is_empty());
    }

    #[test]
    fn year_boundary_months_stay_in_order() {
        let config = EngineConfig::default();
        // December 2025 must sort before January 2026.
        let exams = vec![
            exam(2025, 12, 5, 90.0),
            exam(2026, 1, 5, 88.0),
            exam(2026, 2, 5, 60.0),
            exam(2026, 3, 5, 58.0),
        ];
        let insights = analyze(&exams, today(), &config);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].evidence.iter().any(|e| e.contains("89.0")));
    }
}
