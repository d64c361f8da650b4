//! End-to-end encoding and train/evaluate passes over an in-memory frame

use polars::prelude::*;

use super::assembler::{FeatureEncoder, FeatureMatrix};
use super::columns::classify_columns;
use super::config::TrainConfig;
use super::encoder::BinaryMapping;
use super::error::{PipelineError, PipelineResult};
use super::loader::take_rows;
use super::model::{FitOutcome, LogisticRegression};
use super::split::stratified_split;
use super::target::normalize_target;
use crate::report::MetricsRecord;

/// Output of the standalone encoding job
#[derive(Debug, Clone)]
pub struct EncodedDataset {
    pub matrix: FeatureMatrix,
    pub encoder: FeatureEncoder,
    pub mappings: Vec<BinaryMapping>,
}

/// Fit the encoder on the whole frame and assemble the feature matrix.
///
/// There is no held-out data in this job, so one fit over all rows is used.
pub fn encode_dataset(df: &DataFrame, separator: &str) -> PipelineResult<EncodedDataset> {
    let partition = classify_columns(df, None)?;
    let (encoder, matrix) = FeatureEncoder::fit_transform(df, &partition, separator)?;
    let mappings = encoder.binary_mappings();

    log::info!(
        "Encoded {} input column(s) into {} output column(s)",
        df.width(),
        matrix.width()
    );

    Ok(EncodedDataset {
        matrix,
        encoder,
        mappings,
    })
}

/// Output of the train-and-evaluate job
#[derive(Debug, Clone)]
pub struct TrainingRun {
    pub rows: usize,
    /// Input columns including the target
    pub columns: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub feature_count: usize,
    /// Encoder fitted on the training partition
    pub encoder: FeatureEncoder,
    pub model: String,
    pub fit: FitOutcome,
    pub train_metrics: MetricsRecord,
    pub test_metrics: MetricsRecord,
}

/// Normalize the target, split, fit the encoder and classifier on the
/// training rows only, and score both partitions.
pub fn train_and_evaluate(df: &DataFrame, config: &TrainConfig) -> PipelineResult<TrainingRun> {
    if df.height() == 0 {
        return Err(PipelineError::EmptyDataset);
    }

    let partition = classify_columns(df, Some(config.target.as_str()))?;
    let target = partition
        .target
        .as_ref()
        .ok_or_else(|| PipelineError::MissingColumn {
            target: config.target.clone(),
            available: partition.feature_order(),
        })?;
    let labels = normalize_target(target)?;

    let split = stratified_split(&labels, config.test_ratio, config.seed)?;
    let train_df = take_rows(df, &split.train)?;
    let test_df = take_rows(df, &split.test)?;
    let y_train: Vec<i32> = split.train.iter().map(|&i| labels[i]).collect();
    let y_test: Vec<i32> = split.test.iter().map(|&i| labels[i]).collect();

    let encoder = FeatureEncoder::fit(&train_df, &partition, &config.separator)?;
    let train_matrix = encoder.transform(&train_df)?;
    let x_train = train_matrix.to_mat()?;
    let x_test = encoder.transform(&test_df)?.to_mat()?;

    let mut model = LogisticRegression::new()
        .with_max_iter(config.max_iter)
        .with_tolerance(config.tolerance)
        .with_learning_rate(config.learning_rate)
        .with_l2_penalty(config.l2_penalty);
    let fit = model.fit(&x_train, &y_train)?;

    let train_metrics = MetricsRecord::compute(&y_train, &model.predict(&x_train)?);
    let test_metrics = MetricsRecord::compute(&y_test, &model.predict(&x_test)?);

    Ok(TrainingRun {
        rows: df.height(),
        columns: df.width(),
        train_rows: split.train.len(),
        test_rows: split.test.len(),
        feature_count: train_matrix.width(),
        encoder,
        model: model.describe(),
        fit,
        train_metrics,
        test_metrics,
    })
}
