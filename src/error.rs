//! Error types for Atlas Insight

use crate::types::StudentId;
use thiserror::Error;

/// Errors that can occur during computation
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("Student not found: {0}")]
    StudentNotFound(StudentId),

    #[error("Class not found: {0}")]
    ClassNotFound(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("History source error: {0}")]
    SourceError(String),

    #[error("Snapshot persistence error: {0}")]
    StorageError(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}
