//! Engine orchestration
//!
//! [`InsightEngine`] wires the pure calculators to an injected history
//! source, snapshot sink, and clock. Every computation is request-scoped and
//! side-effect free; the only writes are the explicit snapshot commits,
//! which are best-effort (a storage failure is logged, never hides the
//! computed result from the caller).

use crate::aggregator::RiskAggregator;
use crate::config::EngineConfig;
use crate::error::InsightError;
use crate::explainer::FactorExplainer;
use crate::factors::{DomainCoverage, FactorCalculator};
use crate::network::{ClassAnalysis, SocialGraphAnalyzer};
use crate::patterns::PatternMiner;
use crate::store::{Clock, HistorySource, SnapshotSink, SystemClock};
use crate::trend::TrendGenerator;
use crate::types::{
    NetworkMetrics, PatternInsight, RiskAssessment, RiskForecast, RiskHistoryEntry, StudentId,
    TrendAnalysis,
};

/// Result of a batch assessment: per-student failures are collected, never
/// allowed to abort the rest of the batch
#[derive(Debug)]
pub struct BatchOutcome {
    pub assessments: Vec<RiskAssessment>,
    pub failures: Vec<(StudentId, InsightError)>,
}

/// Analytics engine bound to a history source and snapshot sink
pub struct InsightEngine<S, K, C = SystemClock> {
    source: S,
    sink: K,
    clock: C,
    config: EngineConfig,
}

impl<S, K> InsightEngine<S, K, SystemClock>
where
    S: HistorySource,
    K: SnapshotSink,
{
    /// Create an engine with the default configuration and wall-clock time
    pub fn new(source: S, sink: K) -> Self {
        Self::with_parts(source, sink, SystemClock, EngineConfig::default())
    }
}

impl<S, K, C> InsightEngine<S, K, C>
where
    S: HistorySource,
    K: SnapshotSink,
    C: Clock,
{
    /// Create an engine with explicit clock and configuration
    pub fn with_parts(source: S, sink: K, clock: C, config: EngineConfig) -> Self {
        Self {
            source,
            sink,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute a fresh risk assessment for one student.
    ///
    /// Idempotent and side-effect free: identical inputs produce identical
    /// output, and nothing is persisted. Use [`commit_to_history`] to write
    /// a snapshot.
    ///
    /// [`commit_to_history`]: Self::commit_to_history
    pub fn assess(&self, student_id: StudentId) -> Result<RiskAssessment, InsightError> {
        let history = self.source.student_history(student_id)?;
        let now = self.clock.now();
        let today = now.date_naive();

        let factors = FactorCalculator::compute(&history, today, &self.config);
        let coverage = DomainCoverage::of(&history);
        let aggregate = RiskAggregator::aggregate(&factors, coverage, &self.config);
        let key_risk_factors = FactorExplainer::key_risk_factors(&factors, &self.config);
        let protective_factors = FactorExplainer::protective_factors(
            history.talents.as_ref(),
            history.social_emotional.as_ref(),
            &self.config,
        );

        Ok(RiskAssessment {
            student_id,
            generated_at: now,
            factors,
            overall_score: aggregate.overall_score,
            risk_level: aggregate.risk_level,
            confidence: aggregate.confidence,
            key_risk_factors,
            protective_factors,
            engine_version: crate::ENGINE_VERSION.to_string(),
        })
    }

    /// Explicitly append an assessment snapshot to the student's history.
    ///
    /// Best-effort: a sink failure is logged and the snapshot is still
    /// returned, so the read path never depends on the write path.
    pub fn commit_to_history(&self, assessment: &RiskAssessment) -> RiskHistoryEntry {
        let entry = RiskHistoryEntry::from_assessment(assessment);
        if let Err(e) = self.sink.append_risk_snapshot(&entry) {
            tracing::warn!(
                student_id = %entry.student_id,
                error = %e,
                "failed to append risk snapshot"
            );
        }
        entry
    }

    /// Compute an assessment and append it to history in one call
    pub fn assess_and_record(
        &self,
        student_id: StudentId,
    ) -> Result<RiskAssessment, InsightError> {
        let assessment = self.assess(student_id)?;
        self.commit_to_history(&assessment);
        Ok(assessment)
    }

    /// Classify the trend of a student's recorded score history
    pub fn trend_analysis(&self, student_id: StudentId) -> Result<TrendAnalysis, InsightError> {
        let history = self
            .source
            .risk_history(student_id, self.config.trend.max_history)?;
        Ok(TrendGenerator::analyze(student_id, &history, &self.config))
    }

    /// Short/medium/long-horizon forecasts from a fresh assessment and the
    /// recorded trend
    pub fn forecast(&self, student_id: StudentId) -> Result<Vec<RiskForecast>, InsightError> {
        let assessment = self.assess(student_id)?;
        let trend = self.trend_analysis(student_id)?;
        Ok(TrendGenerator::forecast(&assessment, &trend, &self.config))
    }

    /// Run all five pattern analyzers over a student's raw history
    pub fn mine_patterns(&self, student_id: StudentId) -> Result<Vec<PatternInsight>, InsightError> {
        let history = self.source.student_history(student_id)?;
        let today = self.clock.now().date_naive();
        Ok(PatternMiner::mine(&history, today, &self.config))
    }

    /// Analyze a class's peer network
    pub fn class_network(&self, class_name: &str) -> Result<ClassAnalysis, InsightError> {
        let roster = self.source.class_roster(class_name)?;
        let edges = self.source.peer_relationships(class_name)?;
        Ok(SocialGraphAnalyzer::analyze(
            class_name,
            &roster,
            &edges,
            &self.config,
        ))
    }

    /// Network metrics for one student within a class
    pub fn student_network_metrics(
        &self,
        student_id: StudentId,
        class_name: &str,
    ) -> Result<NetworkMetrics, InsightError> {
        let analysis = self.class_network(class_name)?;
        analysis
            .metrics
            .into_iter()
            .find(|m| m.student_id == student_id)
            .ok_or(InsightError::StudentNotFound(student_id))
    }

    /// Analyze a class and upsert every student's metrics row.
    ///
    /// Upserts are best-effort per row; failures are logged and the computed
    /// analysis is still returned.
    pub fn record_network_metrics(&self, class_name: &str) -> Result<ClassAnalysis, InsightError> {
        let analysis = self.class_network(class_name)?;
        for metrics in &analysis.metrics {
            if let Err(e) = self.sink.upsert_network_metrics(metrics) {
                tracing::warn!(
                    student_id = %metrics.student_id,
                    class_name,
                    error = %e,
                    "failed to upsert network metrics"
                );
            }
        }
        Ok(analysis)
    }

    /// Assess many students, isolating per-student failures
    pub fn assess_many(&self, student_ids: &[StudentId]) -> BatchOutcome {
        let mut assessments = Vec::new();
        let mut failures = Vec::new();
        for id in student_ids {
            match self.assess(*id) {
                Ok(assessment) => assessments.push(assessment),
                Err(e) => failures.push((*id, e)),
            }
        }
        BatchOutcome {
            assessments,
            failures,
        }
    }
}
