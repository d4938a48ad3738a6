//! Storage collaborator seams
//!
//! The engine never talks to a database. It reads through [`HistorySource`]
//! and writes through [`SnapshotSink`]; both are implemented by the hosting
//! application against whatever backend it uses. The storage layer's atomic
//! insert/upsert is what makes concurrent writers safe; the engine holds no
//! locks and no cross-request state.

use crate::error::InsightError;
use crate::records::StudentHistory;
use crate::types::{NetworkMetrics, PeerRelationship, RiskHistoryEntry, StudentId};
use chrono::{DateTime, Utc};

/// Injectable time source so computations stay deterministic under test
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant, for tests and replay
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Read contract against the record store.
///
/// Implementations return the most recent records per domain, ordered by
/// date descending. An unknown student id is a hard error; a known student
/// with empty domains is not.
pub trait HistorySource {
    /// Fetch the per-domain history bundle for one student
    fn student_history(&self, student_id: StudentId) -> Result<StudentHistory, InsightError>;

    /// Fetch up to `limit` past risk snapshots, newest first
    fn risk_history(
        &self,
        student_id: StudentId,
        limit: usize,
    ) -> Result<Vec<RiskHistoryEntry>, InsightError>;

    /// Fetch the roster of a class
    fn class_roster(&self, class_name: &str) -> Result<Vec<StudentId>, InsightError>;

    /// Fetch all peer-relationship edges for a class
    fn peer_relationships(&self, class_name: &str)
        -> Result<Vec<PeerRelationship>, InsightError>;
}

/// Write contract for the two side-effecting operations.
///
/// Both are single atomic writes delegated to the storage collaborator.
pub trait SnapshotSink {
    /// Append an immutable risk snapshot to the student's history
    fn append_risk_snapshot(&self, entry: &RiskHistoryEntry) -> Result<(), InsightError>;

    /// Upsert the authoritative metrics row for (student, class)
    fn upsert_network_metrics(&self, metrics: &NetworkMetrics) -> Result<(), InsightError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_returns_its_instant() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap();
        let clock = FixedClock(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
