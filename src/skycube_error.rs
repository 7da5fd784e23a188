//! SkycubeError: Unified error type for skycube public APIs
//!
//! Ingestion failures carry the offending line/column so callers can report
//! them precisely; engine failures are limited to re-entry of a one-shot
//! traversal.

use thiserror::Error;

/// Unified error type for skycube operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkycubeError {
    /// A traversal was requested on an engine that already built its lattice.
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),
    /// The input holds no point, or its first row holds no value.
    #[error("Dataset error: no point to load")]
    EmptyDataset,
    /// A row does not have as many values as the first row.
    #[error("Dataset error: line {line} has {found} dimensions instead of {expected}")]
    RaggedRow {
        line: usize,
        found: usize,
        expected: usize,
    },
    /// Two separators with nothing between them.
    #[error("Dataset error: empty field at line {line}, character {column}")]
    EmptyField { line: usize, column: usize },
    /// A field that is not a number.
    #[error("Dataset error: `{token}` at line {line}, character {column} is not a number")]
    InvalidNumber {
        line: usize,
        column: usize,
        token: String,
    },
    /// NaN and infinities have no place in the per-dimension order.
    #[error("Dataset error: non-finite value at line {line}, character {column}")]
    NonFiniteValue { line: usize, column: usize },
    /// The preference vector does not match the number of dimensions.
    #[error("Different number of dimensions between the preferences ({expected}) and the dataset ({found})")]
    PreferenceMismatch { expected: usize, found: usize },
    /// Display labels must name every point exactly once.
    #[error("Dataset error: {found} labels for {expected} points")]
    LabelMismatch { expected: usize, found: usize },
    /// Preference strings only know `l` (lowest) and `u` (uppermost).
    #[error("Invalid preference `{0}`: expected `l` or `u`")]
    InvalidPreference(char),
    /// Reported by `validate_invariants` implementations.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
    /// Underlying reader or writer failure.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for SkycubeError {
    fn from(e: std::io::Error) -> Self {
        SkycubeError::Io(e.to_string())
    }
}
