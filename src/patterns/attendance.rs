//! Attendance pattern analyzer
//!
//! Detects day-of-week absence patterns and short-window absence spikes.

use crate::config::EngineConfig;
use crate::records::{AttendanceRecord, AttendanceStatus};
use crate::types::{InsightCategory, InsightSeverity, PatternInsight};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub fn analyze(
    records: &[AttendanceRecord],
    today: NaiveDate,
    config: &EngineConfig,
) -> Vec<PatternInsight> {
    let window_cutoff = today - Duration::days(config.windows.attendance_days);
    let missed: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| r.date >= window_cutoff && r.status != AttendanceStatus::Present)
        .collect();

    let mut insights = Vec::new();
    insights.extend(weekday_patterns(&missed, config));
    if let Some(insight) = absence_spike(records, today, config) {
        insights.push(insight);
    }
    insights
}

/// Flag any weekday on which absences and tardies pile up
fn weekday_patterns(missed: &[&AttendanceRecord], config: &EngineConfig) -> Vec<PatternInsight> {
    let mut counts = [0usize; 7];
    for record in missed {
        counts[record.date.weekday().num_days_from_monday() as usize] += 1;
    }

    let weekdays = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    weekdays
        .iter()
        .zip(counts.iter())
        .filter(|(_, count)| **count >= config.patterns.weekday_min)
        .map(|(weekday, count)| PatternInsight {
            category: InsightCategory::Pattern,
            severity: InsightSeverity::Warning,
            title: format!("Day-of-week attendance pattern: {weekday}"),
            description: format!(
                "{count} absences or tardies fell on a {weekday} in the last 3 months"
            ),
            evidence: vec![format!("{weekday}: {count} missed or late days in 90 days")],
            recommendation: Some(
                "Ask about recurring commitments or conflicts on that day".to_string(),
            ),
        })
        .collect()
}

/// Flag an absence spike in the last 30 days; CRITICAL above the higher cut
fn absence_spike(
    records: &[AttendanceRecord],
    today: NaiveDate,
    config: &EngineConfig,
) -> Option<PatternInsight> {
    let recent_cutoff = today - Duration::days(config.windows.month_days);
    let absences = records
        .iter()
        .filter(|r| r.date >= recent_cutoff && r.status == AttendanceStatus::Absent)
        .count();

    if absences < config.patterns.absence_warning {
        return None;
    }

    let severity = if absences >= config.patterns.absence_critical {
        InsightSeverity::Critical
    } else {
        InsightSeverity::Warning
    };

    Some(PatternInsight {
        category: InsightCategory::Anomaly,
        severity,
        title: "High recent absence count".to_string(),
        description: format!("{absences} absences in the last 30 days"),
        evidence: vec![format!("last 30 days: {absences} absences")],
        recommendation: Some("Contact the family to identify attendance barriers".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        // A Monday.
        NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
    }

    fn record(days_ago: i64, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            date: today() - Duration::days(days_ago),
            status,
        }
    }

    #[test]
    fn repeated_monday_absences_form_a_pattern() {
        let config = EngineConfig::default();
        // 7, 14, and 21 days before a Monday are all Mondays.
        let records = vec![
            record(7, AttendanceStatus::Absent),
            record(14, AttendanceStatus::Absent),
            record(21, AttendanceStatus::Tardy),
        ];
        let insights = analyze(&records, today(), &config);
        let pattern = insights
            .iter()
            .find(|i| i.title.contains("Day-of-week"))
            .expect("weekday pattern");
        assert!(pattern.title.contains("Mon"));
        assert_eq!(pattern.severity, InsightSeverity::Warning);
        assert!(pattern.evidence[0].contains('3'));
    }

    #[test]
    fn scattered_absences_form_no_weekday_pattern() {
        let config = EngineConfig::default();
        let records = vec![
            record(7, AttendanceStatus::Absent),
            record(8, AttendanceStatus::Absent),
            record(9, AttendanceStatus::Absent),
        ];
        let insights = analyze(&records, today(), &config);
        assert!(!insights.iter().any(|i| i.title.contains("Day-of-week")));
    }

    #[test]
    fn five_recent_absences_are_a_warning() {
        let config = EngineConfig::default();
        let records: Vec<AttendanceRecord> = (0..5)
            .map(|i| record(i * 5 + 1, AttendanceStatus::Absent))
            .collect();
        let insights = analyze(&records, today(), &config);
        let spike = insights
            .iter()
            .find(|i| i.title == "High recent absence count")
            .expect("absence spike");
        assert_eq!(spike.severity, InsightSeverity::Warning);
        assert_eq!(spike.category, InsightCategory::Anomaly);
    }

    #[test]
    fn ten_recent_absences_are_critical() {
        let config = EngineConfig::default();
        let records: Vec<AttendanceRecord> = (0..10)
            .map(|i| record(i * 3, AttendanceStatus::Absent))
            .collect();
        let insights = analyze(&records, today(), &config);
        let spike = insights
            .iter()
            .find(|i| i.title == "High recent absence count")
            .expect("absence spike");
        assert_eq!(spike.severity, InsightSeverity::Critical);
    }

    #[test]
    fn tardies_do_not_count_toward_the_absence_spike() {
        let config = EngineConfig::default();
        let records: Vec<AttendanceRecord> = (0..8)
            .map(|i| record(i * 3 + 1, AttendanceStatus::Tardy))
            .collect();
        let insights = analyze(&records, today(), &config);
        assert!(!insights.iter().any(|i| i.title == "High recent absence count"));
    }
}
