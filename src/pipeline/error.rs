//! Error types for the encoding and training pipeline.
//!
//! Every variant is fatal: the pipeline is a single batch pass with no
//! partial-success mode, so callers propagate these up to the entry point
//! before any output file is written.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised by the pipeline stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The designated target column is absent from the dataset.
    #[error("Target column '{target}' not found in dataset. Available columns: {available:?}")]
    MissingColumn {
        /// Requested target column name
        target: String,
        /// Columns actually present, in file order
        available: Vec<String>,
    },

    /// A label value could not be resolved to 0 or 1.
    #[error("Label value '{value}' at row {row} cannot be mapped to 0/1")]
    UnresolvedLabel {
        /// Zero-based row index of the offending value
        row: usize,
        /// Raw value as read from the file (`null` for missing cells)
        value: String,
    },

    /// No eligible CSV file in the expected input location.
    #[error("No input CSV found in {}: {reason}", dir.display())]
    NoInputFound {
        /// Directory that was searched
        dir: PathBuf,
        /// Why discovery failed
        reason: String,
    },

    /// An encoded block disagrees with the dataset's row count.
    ///
    /// This signals an encoder defect rather than bad input.
    #[error("Encoded column '{column}' has {actual} rows but the dataset has {expected}")]
    RowCountMismatch {
        /// Name of the offending output column
        column: String,
        /// Row count of the source frame
        expected: usize,
        /// Row count of the encoded column
        actual: usize,
    },

    /// The dataset contains no rows.
    #[error("Dataset has no rows")]
    EmptyDataset,

    /// The label column does not hold enough rows of each class to split and fit.
    #[error(
        "Label column needs at least {required} rows of each class, \
         found {zeros} zero(s) and {ones} one(s)"
    )]
    InsufficientClasses {
        zeros: usize,
        ones: usize,
        required: usize,
    },

    /// Two encoded columns ended up with the same output name.
    #[error("Output column '{name}' is produced by both '{first}' and '{second}'")]
    DuplicateColumn {
        name: String,
        /// Origin of the column assembled first
        first: String,
        /// Origin of the colliding column
        second: String,
    },

    /// The classifier was used before `fit`.
    #[error("Model has not been fitted")]
    ModelNotFitted,

    /// The matrix handed to the classifier has a different width than at fit time.
    #[error("Feature matrix has {actual} columns, model was fitted on {expected}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias for pipeline stages.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
