//! Error taxonomy for the tariff pipeline
//!
//! Every derivation error is fatal: a single malformed row would silently
//! corrupt dataset-level aggregates (popularity counts, season partitions),
//! so there is no row-level skip-and-continue anywhere in the pipeline.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while building or evaluating the dataset
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Unparseable date string in the source data
    #[error("row {row}: malformed date '{value}' in column '{column}' (expected YYYY-MM-DD)")]
    MalformedDate {
        value: String,
        column: String,
        row: usize,
    },

    /// Month outside 1..=12 (unreachable for valid calendar dates)
    #[error("invalid month {0}, expected 1..=12")]
    InvalidMonth(u32),

    /// Expected column is missing from an input file
    #[error("missing expected column '{0}'")]
    SchemaMismatch(String),

    /// Null cell where a value is required
    #[error("row {row}: missing value in column '{column}'")]
    MissingValue { column: String, row: usize },

    /// Feature/target row counts do not line up
    #[error("dimension mismatch: expected {expected} rows, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Regressor used before `fit`
    #[error("regressor has not been trained")]
    NotTrained,

    /// Missing or unreadable data file
    #[error("data file error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}
