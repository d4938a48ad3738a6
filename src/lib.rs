//! Atlas Insight - decision-support analytics engine for student risk signals
//!
//! Atlas Insight turns a student's academic, behavioral, attendance,
//! social-emotional, family, and health history into counselor-facing
//! signals through deterministic heuristics: factor scoring → aggregation →
//! explanation, plus independent trend, pattern-mining, and peer-network
//! analyses.
//!
//! ## Modules
//!
//! - **Factors**: eight independent [0,1] risk calculators
//! - **Aggregator/Explainer**: composite score, level, confidence, and
//!   ranked key/protective factors
//! - **Trend**: direction, volatility, and multi-horizon forecasts
//! - **Patterns**: five rule-based insight miners
//! - **Network**: peer-graph centrality, clusters, and conflicts
//!
//! Storage and time are injected through the traits in [`store`]; the
//! engine itself holds no cross-request state.

pub mod aggregator;
pub mod config;
pub mod engine;
pub mod error;
pub mod explainer;
pub mod factors;
pub mod network;
pub mod patterns;
pub mod records;
pub mod store;
pub mod trend;
pub mod types;

pub use aggregator::{AggregateRisk, RiskAggregator};
pub use config::EngineConfig;
pub use engine::{BatchOutcome, InsightEngine};
pub use error::InsightError;
pub use explainer::FactorExplainer;
pub use factors::{DomainCoverage, FactorCalculator};
pub use network::{ClassAnalysis, SocialGraphAnalyzer};
pub use patterns::PatternMiner;
pub use records::StudentHistory;
pub use store::{Clock, FixedClock, HistorySource, SnapshotSink, SystemClock};
pub use trend::TrendGenerator;
pub use types::{
    ClassNetwork, FactorScores, NetworkMetrics, PatternInsight, PeerRelationship, RiskAssessment,
    RiskForecast, RiskHistoryEntry, RiskLevel, StudentId, TrendAnalysis,
};

/// Engine version stamped into every assessment
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
