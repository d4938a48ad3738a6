//! Input records supplied by the history source
//!
//! These types mirror the read contract: per-domain record lists ordered by
//! date descending, plus optional one-row profile snapshots. The engine never
//! touches storage directly; a `HistorySource` implementation assembles a
//! `StudentHistory` from whatever backend it fronts.

use crate::types::StudentId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single exam result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResult {
    pub date: NaiveDate,
    pub subject: String,
    /// Score on a 0-100 scale
    pub score: f64,
}

/// Whether an incident counts for or against the student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentKind {
    Positive,
    Negative,
}

/// Reported severity of a behavior incident
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentSeverity {
    Low,
    Medium,
    High,
}

impl IncidentSeverity {
    /// Risk weight of this severity (LOW 0.3, MEDIUM 0.6, HIGH 1.0)
    pub fn risk_weight(&self) -> f64 {
        match self {
            IncidentSeverity::Low => 0.3,
            IncidentSeverity::Medium => 0.6,
            IncidentSeverity::High => 1.0,
        }
    }
}

/// A recorded behavior incident
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorIncident {
    pub date: NaiveDate,
    pub kind: IncidentKind,
    /// Free-form category label, e.g. "disruption" or "aggression"
    pub category: String,
    pub severity: IncidentSeverity,
}

/// Attendance status for one school day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Tardy,
}

/// One attendance record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Reported friend circle size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendCircleSize {
    None,
    Few,
    Moderate,
    Large,
}

/// Bullying involvement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BullyingStatus {
    None,
    Victim,
    Perpetrator,
    Both,
    Observer,
}

/// Social-emotional snapshot. Skill levels use a 1-5 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialEmotionalProfile {
    pub empathy: u8,
    pub emotion_regulation: u8,
    pub conflict_resolution: u8,
    pub leadership: u8,
    pub friend_circle: FriendCircleSize,
    pub bullying: BullyingStatus,
}

/// Three-level categorical rating used by the family and peer snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportLevel {
    Low,
    Medium,
    High,
}

impl SupportLevel {
    /// Risk contribution of this rating (LOW support = high risk)
    pub fn risk_weight(&self) -> f64 {
        match self {
            SupportLevel::Low => 1.0,
            SupportLevel::Medium => 0.5,
            SupportLevel::High => 0.0,
        }
    }
}

/// Family-context snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyContext {
    pub parental_involvement: SupportLevel,
    pub family_stability: SupportLevel,
    pub communication_quality: SupportLevel,
}

/// Peer-relations snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerProfile {
    pub social_integration: SupportLevel,
    pub friendship_quality: SupportLevel,
    /// Acceptance by peers on a 0-10 scale
    pub peer_acceptance: f64,
}

/// Motivation snapshot. Levels use a 1-5 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotivationProfile {
    pub intrinsic_motivation: u8,
    pub resilience: u8,
}

/// Health snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthProfile {
    pub chronic_conditions: Vec<String>,
    pub concerns: Vec<String>,
}

impl HealthProfile {
    /// Build a profile from text-encoded list columns, tolerating malformed
    /// JSON (replaced with an empty list, see [`parse_string_list`]).
    pub fn from_raw(
        student_id: StudentId,
        chronic_raw: Option<&str>,
        concerns_raw: Option<&str>,
    ) -> Self {
        Self {
            chronic_conditions: parse_list_field(student_id, "chronic_conditions", chronic_raw),
            concerns: parse_list_field(student_id, "concerns", concerns_raw),
        }
    }
}

/// Talent/strength snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalentProfile {
    pub creative_talents: Vec<String>,
    pub physical_talents: Vec<String>,
}

impl TalentProfile {
    /// Build a profile from text-encoded list columns
    pub fn from_raw(
        student_id: StudentId,
        creative_raw: Option<&str>,
        physical_raw: Option<&str>,
    ) -> Self {
        Self {
            creative_talents: parse_list_field(student_id, "creative_talents", creative_raw),
            physical_talents: parse_list_field(student_id, "physical_talents", physical_raw),
        }
    }
}

/// Outcome of parsing a text-encoded list column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedList {
    /// Valid JSON array of strings
    Parsed(Vec<String>),
    /// Column was NULL or blank
    Empty,
    /// Column held something other than a JSON string array; the raw text is
    /// preserved for the caller's log line
    Malformed(String),
}

impl ParsedList {
    /// Collapse to a list, with `Malformed` becoming empty
    pub fn into_list(self) -> Vec<String> {
        match self {
            ParsedList::Parsed(items) => items,
            ParsedList::Empty | ParsedList::Malformed(_) => Vec::new(),
        }
    }
}

/// Safely parse a text-encoded string list.
///
/// Legacy rows store optional lists as JSON in a text column. A malformed
/// value must never abort the surrounding computation, so the result is
/// tagged rather than being a hard error.
pub fn parse_string_list(raw: Option<&str>) -> ParsedList {
    let raw = match raw {
        Some(r) if !r.trim().is_empty() => r,
        _ => return ParsedList::Empty,
    };
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(items) => ParsedList::Parsed(items),
        Err(_) => ParsedList::Malformed(raw.to_string()),
    }
}

fn parse_list_field(student_id: StudentId, field: &str, raw: Option<&str>) -> Vec<String> {
    match parse_string_list(raw) {
        ParsedList::Parsed(items) => items,
        ParsedList::Empty => Vec::new(),
        ParsedList::Malformed(raw) => {
            tracing::warn!(
                student_id = %student_id,
                field,
                raw,
                "malformed list column, treating as empty"
            );
            Vec::new()
        }
    }
}

/// Everything the history source returns for one student: per-domain record
/// lists (date descending) and optional profile snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentHistory {
    pub exams: Vec<ExamResult>,
    pub incidents: Vec<BehaviorIncident>,
    pub attendance: Vec<AttendanceRecord>,
    pub social_emotional: Option<SocialEmotionalProfile>,
    pub family: Option<FamilyContext>,
    pub peer: Option<PeerProfile>,
    pub motivation: Option<MotivationProfile>,
    pub health: Option<HealthProfile>,
    pub talents: Option<TalentProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    #[test]
    fn parses_valid_list_column() {
        let parsed = parse_string_list(Some(r#"["asthma","allergies"]"#));
        assert_eq!(
            parsed,
            ParsedList::Parsed(vec!["asthma".to_string(), "allergies".to_string()])
        );
    }

    #[test]
    fn blank_and_missing_columns_are_empty() {
        assert_eq!(parse_string_list(None), ParsedList::Empty);
        assert_eq!(parse_string_list(Some("   ")), ParsedList::Empty);
    }

    #[test]
    fn malformed_column_is_tagged_not_fatal() {
        let parsed = parse_string_list(Some("asthma, allergies"));
        assert_eq!(parsed, ParsedList::Malformed("asthma, allergies".to_string()));
        assert!(parsed.into_list().is_empty());
    }

    #[test]
    fn health_profile_from_raw_tolerates_bad_columns() {
        let profile = HealthProfile::from_raw(
            Uuid::new_v4(),
            Some(r#"["diabetes"]"#),
            Some("not json"),
        );
        assert_eq!(profile.chronic_conditions, vec!["diabetes".to_string()]);
        assert!(profile.concerns.is_empty());
    }

    #[test]
    fn severity_weights_match_mapping() {
        assert_eq!(IncidentSeverity::Low.risk_weight(), 0.3);
        assert_eq!(IncidentSeverity::Medium.risk_weight(), 0.6);
        assert_eq!(IncidentSeverity::High.risk_weight(), 1.0);
    }
}
