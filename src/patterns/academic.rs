//! Academic trend analyzer
//!
//! Compares the mean of the last 3 exam scores against the first 3 in the
//! window, overall and per subject.

use crate::config::EngineConfig;
use crate::records::ExamResult;
use crate::types::{InsightCategory, InsightSeverity, PatternInsight};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Minimum exams needed for a non-overlapping first-3/last-3 comparison
const MIN_EXAMS: usize = 6;

pub fn analyze(exams: &[ExamResult], today: NaiveDate, config: &EngineConfig) -> Vec<PatternInsight> {
    let cutoff = today - Duration::days(config.windows.academic_days);
    let mut windowed: Vec<&ExamResult> = exams.iter().filter(|e| e.date >= cutoff).collect();
    windowed.sort_by_key(|e| e.date);

    let mut insights = Vec::new();

    if let Some(insight) = trend_insight(&windowed, config.patterns.exam_delta, None) {
        insights.push(insight);
    }

    let mut by_subject: BTreeMap<&str, Vec<&ExamResult>> = BTreeMap::new();
    for exam in windowed.iter().copied() {
        by_subject.entry(exam.subject.as_str()).or_default().push(exam);
    }
    for (subject, subject_exams) in by_subject {
        if let Some(insight) =
            trend_insight(&subject_exams, config.patterns.subject_delta, Some(subject))
        {
            insights.push(insight);
        }
    }

    insights
}

/// Emit a trend insight when the last-3 average moved more than `delta`
/// points from the first-3 average. `exams` must be sorted oldest first.
fn trend_insight(
    exams: &[&ExamResult],
    delta_threshold: f64,
    subject: Option<&str>,
) -> Option<PatternInsight> {
    if exams.len() < MIN_EXAMS {
        return None;
    }

    let first_avg = exams[..3].iter().map(|e| e.score).sum::<f64>() / 3.0;
    let last_avg = exams[exams.len() - 3..].iter().map(|e| e.score).sum::<f64>() / 3.0;
    let delta = last_avg - first_avg;

    let scope = subject.unwrap_or("overall");
    let evidence = vec![
        format!("earlier average ({scope}): {first_avg:.1}"),
        format!("recent average ({scope}): {last_avg:.1}"),
        format!("change: {delta:+.1} points"),
    ];

    if delta > delta_threshold {
        Some(PatternInsight {
            category: InsightCategory::Trend,
            severity: InsightSeverity::Info,
            title: match subject {
                Some(s) => format!("Improving grades in {s}"),
                None => "Improving grade trend".to_string(),
            },
            description: format!(
                "Recent exam scores average {last_avg:.1}, up {delta:.1} points from {first_avg:.1}"
            ),
            evidence,
            recommendation: None,
        })
    } else if delta < -delta_threshold {
        Some(PatternInsight {
            category: InsightCategory::Trend,
            severity: InsightSeverity::Warning,
            title: match subject {
                Some(s) => format!("Declining grades in {s}"),
                None => "Declining grade trend".to_string(),
            },
            description: format!(
                "Recent exam scores average {last_avg:.1}, down {:.1} points from {first_avg:.1}",
                -delta
            ),
            evidence,
            recommendation: Some("Review recent coursework and consider targeted tutoring".to_string()),
        })
    } else {
        None
    }
}
