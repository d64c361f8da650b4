//! Command-line argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::{
    EncodeConfig, TrainConfig, DEFAULT_DATA_DIR, DEFAULT_ENCODED_OUTPUT,
    DEFAULT_INFER_SCHEMA_LENGTH, DEFAULT_L2_PENALTY, DEFAULT_LEARNING_RATE,
    DEFAULT_MAPPINGS_OUTPUT, DEFAULT_MAX_ITER, DEFAULT_REPORT_OUTPUT, DEFAULT_SEED,
    DEFAULT_SEPARATOR, DEFAULT_TARGET, DEFAULT_TEST_RATIO, DEFAULT_TOLERANCE,
    DEFAULT_TRAIN_INPUT,
};

/// heartprep - Encode a health-survey CSV and train a balanced disease classifier
#[derive(Parser, Debug)]
#[command(name = "heartprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Job to run; defaults to `encode` with default settings
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scale numeric columns, binary/one-hot encode categorical columns and export the matrix
    Encode(EncodeArgs),

    /// Split 80/20 (stratified), train a class-balanced logistic regression and report metrics
    Train(TrainArgs),
}

#[derive(Args, Debug, Clone)]
pub struct EncodeArgs {
    /// Directory searched for the input CSV (the first *.csv in sorted order is used)
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Encoded feature matrix output (CSV)
    #[arg(short, long, default_value = DEFAULT_ENCODED_OUTPUT)]
    pub output: PathBuf,

    /// Binary mapping output (JSON), written only if a binary column exists
    #[arg(long, default_value = DEFAULT_MAPPINGS_OUTPUT)]
    pub mappings: PathBuf,

    /// Separator between column name and category in one-hot column names
    #[arg(long, default_value = DEFAULT_SEPARATOR, value_parser = validate_separator)]
    pub separator: String,

    /// Number of rows to use for schema inference.
    /// Use 0 for full table scan (slow for large files).
    #[arg(long, default_value_t = DEFAULT_INFER_SCHEMA_LENGTH)]
    pub infer_schema_length: usize,
}

impl EncodeArgs {
    pub fn to_config(&self) -> EncodeConfig {
        EncodeConfig {
            data_dir: self.data_dir.clone(),
            output_csv: self.output.clone(),
            output_mappings: self.mappings.clone(),
            infer_schema_length: self.infer_schema_length,
            separator: self.separator.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    /// Input CSV file
    #[arg(short, long, default_value = DEFAULT_TRAIN_INPUT)]
    pub input: PathBuf,

    /// Target (label) column name
    #[arg(short, long, default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Text report output
    #[arg(short, long, default_value = DEFAULT_REPORT_OUTPUT)]
    pub report: PathBuf,

    /// Fraction of rows held out for testing (exclusive 0.0 to 1.0)
    #[arg(long, default_value_t = DEFAULT_TEST_RATIO, value_parser = validate_test_ratio)]
    pub test_ratio: f64,

    /// Seed for the stratified shuffle
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum gradient descent iterations
    #[arg(long, default_value_t = DEFAULT_MAX_ITER)]
    pub max_iter: usize,

    /// Convergence tolerance on the gradient norm
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Gradient descent step size
    #[arg(long, default_value_t = DEFAULT_LEARNING_RATE)]
    pub learning_rate: f64,

    /// L2 penalty on the coefficients
    #[arg(long, default_value_t = DEFAULT_L2_PENALTY)]
    pub l2_penalty: f64,

    /// Number of rows to use for schema inference (0 for full scan)
    #[arg(long, default_value_t = DEFAULT_INFER_SCHEMA_LENGTH)]
    pub infer_schema_length: usize,
}

impl TrainArgs {
    pub fn to_config(&self) -> TrainConfig {
        TrainConfig {
            input: self.input.clone(),
            target: self.target.clone(),
            output_report: self.report.clone(),
            test_ratio: self.test_ratio,
            seed: self.seed,
            max_iter: self.max_iter,
            tolerance: self.tolerance,
            learning_rate: self.learning_rate,
            l2_penalty: self.l2_penalty,
            infer_schema_length: self.infer_schema_length,
            ..TrainConfig::default()
        }
    }
}

/// Validator for test_ratio parameter
fn validate_test_ratio(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!(
            "test_ratio must be strictly between 0.0 and 1.0, got {}",
            value
        ))
    }
}

/// Validator for separator parameter
fn validate_separator(s: &str) -> Result<String, String> {
    if s.is_empty() {
        Err("separator must not be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}
