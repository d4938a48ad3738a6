//! Pattern mining engine
//!
//! Five independent rule-based analyzers over raw time-series data, each
//! emitting zero or more [`PatternInsight`] records with fixed numeric
//! thresholds. Insights are generated on demand and never persisted.

pub mod academic;
pub mod attendance;
pub mod behavioral;
pub mod correlation;
pub mod seasonal;

use crate::config::EngineConfig;
use crate::records::StudentHistory;
use crate::types::PatternInsight;
use chrono::NaiveDate;

/// Miner running all five analyzers over a student's history
pub struct PatternMiner;

impl PatternMiner {
    /// Run every analyzer and return the combined insights ordered
    /// CRITICAL -> WARNING -> INFO for display.
    pub fn mine(
        history: &StudentHistory,
        today: NaiveDate,
        config: &EngineConfig,
    ) -> Vec<PatternInsight> {
        let mut insights = Vec::new();
        insights.extend(academic::analyze(&history.exams, today, config));
        insights.extend(behavioral::analyze(&history.incidents, today, config));
        insights.extend(attendance::analyze(&history.attendance, today, config));
        insights.extend(correlation::analyze(history, today, config));
        insights.extend(seasonal::analyze(&history.exams, today, config));
        order_by_severity(insights)
    }
}

/// Stable sort by severity descending, preserving analyzer order within a
/// severity tier
pub fn order_by_severity(mut insights: Vec<PatternInsight>) -> Vec<PatternInsight> {
    insights.sort_by(|a, b| b.severity.cmp(&a.severity));
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InsightCategory, InsightSeverity};

    fn insight(severity: InsightSeverity, title: &str) -> PatternInsight {
        PatternInsight {
            category: InsightCategory::Pattern,
            severity,
            title: title.to_string(),
            description: String::new(),
            evidence: Vec::new(),
            recommendation: None,
        }
    }

    #[test]
    fn ordering_puts_critical_first_and_is_stable() {
        let mixed = vec![
            insight(InsightSeverity::Info, "a"),
            insight(InsightSeverity::Critical, "b"),
            insight(InsightSeverity::Warning, "c"),
            insight(InsightSeverity::Warning, "d"),
        ];
        let ordered = order_by_severity(mixed);
        let titles: Vec<&str> = ordered.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn empty_history_yields_no_insights() {
        let config = EngineConfig::default();
        let today = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        let insights = PatternMiner::mine(&StudentHistory::default(), today, &config);
        assert!(insights.is_empty());
    }
}
