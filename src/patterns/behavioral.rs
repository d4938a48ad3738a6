//! Behavioral pattern analyzer
//!
//! Flags month-over-month increases in negative incidents and behavior
//! categories that repeat within the window.

use crate::config::EngineConfig;
use crate::records::{BehaviorIncident, IncidentKind};
use crate::types::{InsightCategory, InsightSeverity, PatternInsight};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

pub fn analyze(
    incidents: &[BehaviorIncident],
    today: NaiveDate,
    config: &EngineConfig,
) -> Vec<PatternInsight> {
    let window_cutoff = today - Duration::days(config.windows.behavioral_days);
    let negative: Vec<&BehaviorIncident> = incidents
        .iter()
        .filter(|i| i.kind == IncidentKind::Negative && i.date >= window_cutoff)
        .collect();

    let mut insights = Vec::new();

    if let Some(insight) = month_over_month(&negative, today, config) {
        insights.push(insight);
    }
    insights.extend(repeated_categories(&negative, config));

    insights
}

/// Flag when the last 30 days saw more negative incidents than the 30 days
/// before, and at least the configured minimum
fn month_over_month(
    negative: &[&BehaviorIncident],
    today: NaiveDate,
    config: &EngineConfig,
) -> Option<PatternInsight> {
    let month = config.windows.month_days;
    let recent_cutoff = today - Duration::days(month);
    let previous_cutoff = today - Duration::days(2 * month);

    let recent = negative.iter().filter(|i| i.date >= recent_cutoff).count();
    let previous = negative
        .iter()
        .filter(|i| i.date >= previous_cutoff && i.date < recent_cutoff)
        .count();

    if recent > previous && recent >= config.patterns.incident_increase_min {
        Some(PatternInsight {
            category: InsightCategory::Trend,
            severity: InsightSeverity::Warning,
            title: "Behavior incidents increasing".to_string(),
            description: format!(
                "{recent} negative incidents in the last 30 days, up from {previous} in the month before"
            ),
            evidence: vec![
                format!("last 30 days: {recent} incidents"),
                format!("previous 30 days: {previous} incidents"),
            ],
            recommendation: Some(
                "Schedule a behavioral consultation before the pattern escalates".to_string(),
            ),
        })
    } else {
        None
    }
}

/// Flag any behavior category repeated at least the warning threshold times
/// within the window; escalate to CRITICAL at the critical threshold
fn repeated_categories(negative: &[&BehaviorIncident], config: &EngineConfig) -> Vec<PatternInsight> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for incident in negative {
        *counts.entry(incident.category.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count >= config.patterns.repeat_warning)
        .map(|(category, count)| {
            let severity = if count >= config.patterns.repeat_critical {
                InsightSeverity::Critical
            } else {
                InsightSeverity::Warning
            };
            PatternInsight {
                category: InsightCategory::Pattern,
                severity,
                title: format!("Repeated behavior pattern: {category}"),
                description: format!(
                    "\"{category}\" incidents occurred {count} times in the last 3 months"
                ),
                evidence: vec![format!("{category}: {count} occurrences in 90 days")],
                recommendation: Some(
                    "Address the recurring behavior with a targeted intervention plan".to_string(),
                ),
            }
        })
        .collect()
}
