//! Error types for snapshot loading and persistence.
//!
//! Ordinary game actions (unknown location, insufficient savings, ...) are not
//! errors; they return `false` and leave the game untouched.

/// A snapshot that cannot describe a valid game.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u8),

    #[error("year must be at least 1")]
    InvalidYear,

    #[error("unknown location: {0}")]
    UnknownLocation(String),

    #[error("unknown job title: {0}")]
    UnknownJob(String),

    #[error("salary {salary} does not match job salary {expected}")]
    SalaryMismatch { salary: i64, expected: i64 },

    #[error("expenses must be non-negative and sum to a representable total")]
    InvalidExpenses,
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("save data could not be encoded or decoded: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save store failed: {0}")]
    Store(String),

    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}
