//! Error types for table and statistics operations

use thiserror::Error;

/// Errors raised by table construction and aggregation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// Referenced column is not part of the table
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// Row value count does not match the column count
    #[error("row has {actual} values but the table has {expected} columns")]
    ArityMismatch { expected: usize, actual: usize },

    /// Aggregation needs numbers but the column holds text
    #[error("column '{column}' contains non-numeric values")]
    NotNumeric { column: String },

    /// Aggregation over zero values
    #[error("column '{0}' has no values to aggregate")]
    EmptyColumn(String),

    /// Column name appears twice in one table
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    /// Column length differs from the table's row count
    #[error("column '{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

/// Result alias for table and statistics operations
pub type Result<T> = std::result::Result<T, StatsError>;
