//! Run configuration for the encoding and training jobs
//!
//! Both jobs receive an explicit config struct; nothing is resolved from
//! process state at load time.

use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_ENCODED_OUTPUT: &str = "processing_heart_disease.csv";
pub const DEFAULT_MAPPINGS_OUTPUT: &str = "processing_heart_disease_mappings.json";
pub const DEFAULT_SEPARATOR: &str = "__";
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 10_000;

pub const DEFAULT_TRAIN_INPUT: &str = "data/heart_2020_cleaned.csv";
pub const DEFAULT_TARGET: &str = "HeartDisease";
pub const DEFAULT_REPORT_OUTPUT: &str = "results_training_model_heart_disease_balanced.txt";
pub const DEFAULT_TEST_RATIO: f64 = 0.20;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_MAX_ITER: usize = 1000;
pub const DEFAULT_TOLERANCE: f64 = 1e-4;
pub const DEFAULT_LEARNING_RATE: f64 = 0.5;
pub const DEFAULT_L2_PENALTY: f64 = 1e-4;

/// Settings for the standalone encoding job.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeConfig {
    /// Directory searched for the input CSV
    pub data_dir: PathBuf,
    /// Encoded feature matrix destination
    pub output_csv: PathBuf,
    /// Binary mapping document destination (written only if a mapping exists)
    pub output_mappings: PathBuf,
    /// Rows used for CSV schema inference; 0 scans the whole file
    pub infer_schema_length: usize,
    /// Token joining a column name and a category in one-hot column names
    pub separator: String,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_csv: PathBuf::from(DEFAULT_ENCODED_OUTPUT),
            output_mappings: PathBuf::from(DEFAULT_MAPPINGS_OUTPUT),
            infer_schema_length: DEFAULT_INFER_SCHEMA_LENGTH,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

/// Settings for the train-and-evaluate job.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub input: PathBuf,
    pub target: String,
    pub output_report: PathBuf,
    /// Fraction of rows held out for evaluation, in (0, 1)
    pub test_ratio: f64,
    /// Shuffle seed for the stratified split
    pub seed: u64,
    pub max_iter: usize,
    /// Gradient-norm threshold below which the fit is considered converged
    pub tolerance: f64,
    pub learning_rate: f64,
    pub l2_penalty: f64,
    pub infer_schema_length: usize,
    pub separator: String,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_TRAIN_INPUT),
            target: DEFAULT_TARGET.to_string(),
            output_report: PathBuf::from(DEFAULT_REPORT_OUTPUT),
            test_ratio: DEFAULT_TEST_RATIO,
            seed: DEFAULT_SEED,
            max_iter: DEFAULT_MAX_ITER,
            tolerance: DEFAULT_TOLERANCE,
            learning_rate: DEFAULT_LEARNING_RATE,
            l2_penalty: DEFAULT_L2_PENALTY,
            infer_schema_length: DEFAULT_INFER_SCHEMA_LENGTH,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}
